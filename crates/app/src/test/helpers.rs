//! Test Helpers

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::Barrier;

use crate::{
    domain::{
        carts::{
            CartsService, CartsServiceError,
            models::{AddCartLine, CartLine, MergedLine},
        },
        customers::{AddressUuid, CustomerUuid},
        orders::models::{CheckoutLine, CheckoutMode, PlaceOrder},
        products::models::ProductUuid,
        stock::{StockLedger, StockLedgerError, StockStatusCounts},
    },
    test::TestContext,
};

pub(crate) async fn add_line(
    ctx: &TestContext,
    customer: CustomerUuid,
    product: ProductUuid,
    quantity: u32,
) -> Result<MergedLine, CartsServiceError> {
    ctx.carts
        .add_or_merge_line(AddCartLine {
            customer_uuid: customer,
            product_uuid: product,
            quantity,
            selected_color: None,
            selected_size: None,
            unit_price: None,
        })
        .await
}

/// A complete checkout request for the given cart lines.
pub(crate) fn place_request(
    customer: CustomerUuid,
    mode: CheckoutMode,
    lines: Vec<CartLine>,
    shipping_fee: Decimal,
) -> PlaceOrder {
    PlaceOrder {
        customer_uuid: customer,
        address_uuid: Some(AddressUuid::new()),
        payment_method: Some("card".to_string()),
        lines: lines.into_iter().map(CheckoutLine::from).collect(),
        shipping_fee,
        mode,
    }
}

/// Ledger wrapper that holds every reader until `parties` readers have read.
///
/// Each reader sees the stock as it was before any of them wrote, which
/// forces the interleaving where two read-then-write sequences overlap.
pub(crate) struct BarrierLedger {
    inner: Arc<dyn StockLedger>,
    barrier: Barrier,
}

impl BarrierLedger {
    pub fn new(inner: Arc<dyn StockLedger>, parties: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(parties),
        }
    }
}

#[async_trait]
impl StockLedger for BarrierLedger {
    async fn read_stock(&self, product: ProductUuid) -> Result<u32, StockLedgerError> {
        let stock = self.inner.read_stock(product).await?;

        self.barrier.wait().await;

        Ok(stock)
    }

    async fn write_stock(
        &self,
        product: ProductUuid,
        target: i64,
    ) -> Result<u32, StockLedgerError> {
        self.inner.write_stock(product, target).await
    }

    async fn take_stock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u32, StockLedgerError> {
        self.inner.take_stock(product, quantity).await
    }

    async fn return_stock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u32, StockLedgerError> {
        self.inner.return_stock(product, quantity).await
    }

    async fn take_stock_clamped(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u32, StockLedgerError> {
        self.inner.take_stock_clamped(product, quantity).await
    }

    async fn count_by_status(
        &self,
        low_threshold: u32,
    ) -> Result<StockStatusCounts, StockLedgerError> {
        self.inner.count_by_status(low_threshold).await
    }
}
