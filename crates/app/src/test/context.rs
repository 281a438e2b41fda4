//! Test context for service-level tests.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    domain::{
        carts::{CartLinesRepository, CartsService, LedgerCartsService},
        inventory::{InventoryService, LedgerInventoryService},
        orders::{LedgerOrdersService, OrdersRepository, OrdersService},
        policies::InventoryPolicies,
        products::{
            ProductsService, ProductsServiceError,
            models::{NewProduct, Product, ProductUuid},
        },
        stock::{StockKeeper, StockLedger},
    },
    memory::InMemoryStore,
};

/// Services wired over one shared in-memory store.
///
/// The storage handles are exposed alongside the services so tests can
/// inspect state directly or assemble a service around a mock.
pub(crate) struct TestContext {
    pub policies: InventoryPolicies,
    pub ledger: Arc<dyn StockLedger>,
    pub lines: Arc<dyn CartLinesRepository>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub inventory: Arc<dyn InventoryService>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_policies(InventoryPolicies::default())
    }

    pub fn with_policies(policies: InventoryPolicies) -> Self {
        let store = InMemoryStore::new();

        let ledger: Arc<dyn StockLedger> = Arc::new(store.clone());
        let lines: Arc<dyn CartLinesRepository> = Arc::new(store.clone());
        let order_rows: Arc<dyn OrdersRepository> = Arc::new(store.clone());
        let products: Arc<dyn ProductsService> = Arc::new(store);
        let keeper = StockKeeper::new(ledger.clone(), policies.consistency);

        Self {
            carts: Arc::new(LedgerCartsService::new(
                products.clone(),
                lines.clone(),
                keeper.clone(),
                policies.reservation,
            )),
            orders: Arc::new(LedgerOrdersService::new(
                order_rows,
                lines.clone(),
                keeper.clone(),
                policies,
            )),
            inventory: Arc::new(LedgerInventoryService::new(
                products.clone(),
                keeper,
                policies.low_stock_threshold,
            )),
            policies,
            ledger,
            lines,
            products,
        }
    }

    /// Seed a product with the given price and opening stock.
    pub async fn create_product(
        &self,
        price: Decimal,
        stock: u32,
    ) -> Result<Product, ProductsServiceError> {
        self.products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                price,
                stock_quantity: stock,
            })
            .await
    }
}
