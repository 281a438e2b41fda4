//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        carts::{CartLinesRepository, CartsService, LedgerCartsService, PgCartLinesRepository},
        inventory::{InventoryService, LedgerInventoryService},
        orders::{LedgerOrdersService, OrdersRepository, OrdersService, PgOrdersRepository},
        policies::InventoryPolicies,
        products::{PgProductsService, ProductsService},
        stock::{PgStockLedger, StockKeeper, StockLedger},
    },
    memory::InMemoryStore,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Every service the binaries expose, wired over one store.
#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub inventory: Arc<dyn InventoryService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        policies: InventoryPolicies,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(&Db::new(pool), policies))
    }

    /// Wire the `PostgreSQL` implementations.
    #[must_use]
    pub fn from_db(db: &Db, policies: InventoryPolicies) -> Self {
        Self::wire(
            Arc::new(PgStockLedger::new(db.clone())),
            Arc::new(PgProductsService::new(db.clone())),
            Arc::new(PgCartLinesRepository::new(db.clone())),
            Arc::new(PgOrdersRepository::new(db.clone())),
            policies,
        )
    }

    /// Wire everything over a fresh process-local store.
    #[must_use]
    pub fn in_memory(policies: InventoryPolicies) -> Self {
        let store = InMemoryStore::new();

        Self::wire(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
            policies,
        )
    }

    fn wire(
        ledger: Arc<dyn StockLedger>,
        products: Arc<dyn ProductsService>,
        lines: Arc<dyn CartLinesRepository>,
        orders: Arc<dyn OrdersRepository>,
        policies: InventoryPolicies,
    ) -> Self {
        let keeper = StockKeeper::new(ledger, policies.consistency);

        Self {
            carts: Arc::new(LedgerCartsService::new(
                products.clone(),
                lines.clone(),
                keeper.clone(),
                policies.reservation,
            )),
            orders: Arc::new(LedgerOrdersService::new(
                orders,
                lines,
                keeper.clone(),
                policies,
            )),
            inventory: Arc::new(LedgerInventoryService::new(
                products.clone(),
                keeper,
                policies.low_stock_threshold,
            )),
            products,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::domain::{
        carts::models::AddCartLine,
        customers::CustomerUuid,
        products::models::{NewProduct, ProductUuid},
    };

    use super::*;

    #[tokio::test]
    async fn in_memory_services_share_one_store() -> TestResult {
        let app = AppContext::in_memory(InventoryPolicies::default());
        let customer = CustomerUuid::new();

        let product = app
            .products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                price: dec!(3.50),
                stock_quantity: 8,
            })
            .await?;

        let added = app
            .carts
            .add_or_merge_line(AddCartLine {
                customer_uuid: customer,
                product_uuid: product.uuid,
                quantity: 1,
                selected_color: None,
                selected_size: None,
                unit_price: None,
            })
            .await?;

        app.carts
            .set_line_quantity(customer, added.line.uuid, 3)
            .await?;

        assert_eq!(app.inventory.read_stock(product.uuid).await?, 6);

        Ok(())
    }
}
