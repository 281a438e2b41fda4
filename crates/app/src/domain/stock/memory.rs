//! In-memory stock ledger

use async_trait::async_trait;
use jiff::Timestamp;

use crate::{
    domain::{
        products::models::{Product, ProductUuid},
        stock::{
            errors::StockLedgerError,
            ledger::{StockLedger, validate_stock_target},
            models::StockStatusCounts,
        },
    },
    memory::InMemoryStore,
};

fn find_product(
    products: &mut [Product],
    uuid: ProductUuid,
) -> Result<&mut Product, StockLedgerError> {
    products
        .iter_mut()
        .find(|product| product.uuid == uuid)
        .ok_or(StockLedgerError::NotFound)
}

fn store_stock(product: &mut Product, target: i64) -> Result<u32, StockLedgerError> {
    let stored = validate_stock_target(target)?;

    product.stock_quantity = stored.unsigned_abs();
    product.updated_at = Timestamp::now();

    Ok(product.stock_quantity)
}

#[async_trait]
impl StockLedger for InMemoryStore {
    async fn read_stock(&self, product: ProductUuid) -> Result<u32, StockLedgerError> {
        let mut tables = self.tables().await;

        Ok(find_product(&mut tables.products, product)?.stock_quantity)
    }

    async fn write_stock(
        &self,
        product: ProductUuid,
        target: i64,
    ) -> Result<u32, StockLedgerError> {
        validate_stock_target(target)?;

        let mut tables = self.tables().await;

        store_stock(find_product(&mut tables.products, product)?, target)
    }

    async fn take_stock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u32, StockLedgerError> {
        let mut tables = self.tables().await;
        let row = find_product(&mut tables.products, product)?;

        if row.stock_quantity < quantity {
            return Err(StockLedgerError::OutOfStock {
                available: row.stock_quantity,
            });
        }

        let target = i64::from(row.stock_quantity - quantity);

        store_stock(row, target)
    }

    async fn return_stock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u32, StockLedgerError> {
        let mut tables = self.tables().await;
        let row = find_product(&mut tables.products, product)?;

        let target = i64::from(row.stock_quantity) + i64::from(quantity);

        store_stock(row, target)
    }

    async fn take_stock_clamped(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u32, StockLedgerError> {
        let mut tables = self.tables().await;
        let row = find_product(&mut tables.products, product)?;

        let target = i64::from(row.stock_quantity.saturating_sub(quantity));

        store_stock(row, target)
    }

    async fn count_by_status(
        &self,
        low_threshold: u32,
    ) -> Result<StockStatusCounts, StockLedgerError> {
        let tables = self.tables().await;

        Ok(StockStatusCounts::tally(
            tables.products.iter().map(|product| product.stock_quantity),
            low_threshold,
        ))
    }
}
