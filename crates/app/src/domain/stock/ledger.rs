//! Stock Ledger
//!
//! The authoritative on-hand count per product. Every read and write is a
//! single committed step against the store.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        products::models::ProductUuid,
        stock::{errors::StockLedgerError, models::StockStatusCounts, repository::PgStockRepository},
    },
};

#[automock]
#[async_trait]
pub trait StockLedger: Send + Sync {
    /// Current stock for a product.
    async fn read_stock(&self, product: ProductUuid) -> Result<u32, StockLedgerError>;

    /// Overwrite the stock with an absolute value and return the stored value.
    ///
    /// Negative targets and targets above `i32::MAX` are rejected without
    /// touching the store.
    async fn write_stock(&self, product: ProductUuid, target: i64)
    -> Result<u32, StockLedgerError>;

    /// Decrement by `quantity` only if enough stock is on hand.
    async fn take_stock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u32, StockLedgerError>;

    /// Increment by `quantity`.
    async fn return_stock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u32, StockLedgerError>;

    /// Decrement by `quantity`, flooring at zero.
    async fn take_stock_clamped(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u32, StockLedgerError>;

    /// Stock status counts over every product.
    async fn count_by_status(
        &self,
        low_threshold: u32,
    ) -> Result<StockStatusCounts, StockLedgerError>;
}

/// Check an absolute stock target and narrow it to the stored width.
pub(crate) fn validate_stock_target(target: i64) -> Result<i32, StockLedgerError> {
    if target < 0 {
        return Err(StockLedgerError::InvalidArgument {
            field: "stock_quantity",
            reason: "must not be negative",
        });
    }

    i32::try_from(target).map_err(|_overflow| StockLedgerError::InvalidArgument {
        field: "stock_quantity",
        reason: "is too large",
    })
}

#[derive(Debug, Clone)]
pub struct PgStockLedger {
    db: Db,
    repository: PgStockRepository,
}

impl PgStockLedger {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStockRepository::new(),
        }
    }
}

#[async_trait]
impl StockLedger for PgStockLedger {
    async fn read_stock(&self, product: ProductUuid) -> Result<u32, StockLedgerError> {
        let mut tx = self.db.begin().await?;

        let stock = self.repository.read_stock(&mut tx, product).await?;

        tx.commit().await?;

        stock.ok_or(StockLedgerError::NotFound)
    }

    async fn write_stock(
        &self,
        product: ProductUuid,
        target: i64,
    ) -> Result<u32, StockLedgerError> {
        let target = validate_stock_target(target)?;

        let mut tx = self.db.begin().await?;

        let stock = self.repository.write_stock(&mut tx, product, target).await?;

        tx.commit().await?;

        Ok(stock)
    }

    async fn take_stock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u32, StockLedgerError> {
        let mut tx = self.db.begin().await?;

        if let Some(stock) = self.repository.take_stock(&mut tx, product, quantity).await? {
            tx.commit().await?;

            return Ok(stock);
        }

        let available = self.repository.read_stock(&mut tx, product).await?;

        tx.rollback().await?;

        match available {
            Some(available) => Err(StockLedgerError::OutOfStock { available }),
            None => Err(StockLedgerError::NotFound),
        }
    }

    async fn return_stock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u32, StockLedgerError> {
        let mut tx = self.db.begin().await?;

        let stock = self
            .repository
            .return_stock(&mut tx, product, quantity)
            .await?;

        tx.commit().await?;

        Ok(stock)
    }

    async fn take_stock_clamped(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u32, StockLedgerError> {
        let mut tx = self.db.begin().await?;

        let stock = self
            .repository
            .take_stock_clamped(&mut tx, product, quantity)
            .await?;

        tx.commit().await?;

        Ok(stock)
    }

    async fn count_by_status(
        &self,
        low_threshold: u32,
    ) -> Result<StockStatusCounts, StockLedgerError> {
        let mut tx = self.db.begin().await?;

        let counts = self.repository.count_by_status(&mut tx, low_threshold).await?;

        tx.commit().await?;

        Ok(counts)
    }
}
