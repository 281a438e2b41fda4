//! Inventory service.
//!
//! Admin stock edits that bypass carts and orders entirely.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashSet;
use tracing::{info, warn};

use crate::{
    domain::{
        inventory::{
            errors::InventoryServiceError,
            models::{
                BulkOperation, BulkRowOutcome, BulkRowResult, BulkStockUpdate, BulkUpdateReport,
                ProductStock, StockPage,
            },
        },
        products::{ProductsService, models::ProductUuid},
        stock::{StockKeeper, StockLedgerError, StockStatusCounts},
    },
    pagination::PageRequest,
};

#[derive(Clone)]
pub struct LedgerInventoryService {
    products: Arc<dyn ProductsService>,
    keeper: StockKeeper,
    low_stock_threshold: u32,
}

impl std::fmt::Debug for LedgerInventoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerInventoryService")
            .field("keeper", &self.keeper)
            .field("low_stock_threshold", &self.low_stock_threshold)
            .finish_non_exhaustive()
    }
}

impl LedgerInventoryService {
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductsService>,
        keeper: StockKeeper,
        low_stock_threshold: u32,
    ) -> Self {
        Self {
            products,
            keeper,
            low_stock_threshold,
        }
    }

    async fn apply_row(
        &self,
        product: ProductUuid,
        operation: BulkOperation,
        amount: u32,
    ) -> Result<u32, StockLedgerError> {
        match operation {
            BulkOperation::Set => self.keeper.set(product, i64::from(amount)).await,
            BulkOperation::Add => self.keeper.add(product, amount).await,
            BulkOperation::Subtract => self.keeper.subtract_clamped(product, amount).await,
        }
    }
}

/// Check a bulk amount and narrow it to the stored width.
fn validate_amount(amount: i64) -> Result<u32, InventoryServiceError> {
    if amount < 0 {
        return Err(InventoryServiceError::InvalidArgument {
            field: "amount",
            reason: "must not be negative",
        });
    }

    i32::try_from(amount)
        .map(i32::unsigned_abs)
        .map_err(|_overflow| InventoryServiceError::InvalidArgument {
            field: "amount",
            reason: "is too large",
        })
}

/// Drop repeated product ids, keeping the first occurrence.
fn dedup_in_order(mut products: Vec<ProductUuid>) -> Vec<ProductUuid> {
    let mut seen = FxHashSet::default();

    products.retain(|product| seen.insert(*product));

    products
}

#[async_trait]
impl InventoryService for LedgerInventoryService {
    async fn read_stock(&self, product: ProductUuid) -> Result<u32, InventoryServiceError> {
        Ok(self.keeper.read(product).await?)
    }

    async fn set_single_stock(
        &self,
        product: ProductUuid,
        stock: i64,
    ) -> Result<u32, InventoryServiceError> {
        let stored = self.keeper.set(product, stock).await?;

        info!(%product, stock = stored, "stock set");

        Ok(stored)
    }

    async fn increment_stock(
        &self,
        product: ProductUuid,
        amount: u32,
    ) -> Result<u32, InventoryServiceError> {
        let stored = self.keeper.add(product, amount).await?;

        info!(%product, amount, stock = stored, "stock incremented");

        Ok(stored)
    }

    async fn decrement_stock(
        &self,
        product: ProductUuid,
        amount: u32,
    ) -> Result<u32, InventoryServiceError> {
        let stored = self.keeper.consume(product, i64::from(amount)).await?;

        info!(%product, amount, stock = stored, "stock decremented");

        Ok(stored)
    }

    async fn apply_bulk_update(
        &self,
        update: BulkStockUpdate,
    ) -> Result<BulkUpdateReport, InventoryServiceError> {
        let amount = validate_amount(update.amount)?;

        if update.products.is_empty() {
            return Err(InventoryServiceError::InvalidArgument {
                field: "products",
                reason: "must not be empty",
            });
        }

        let mut report = BulkUpdateReport::default();

        for product in dedup_in_order(update.products) {
            let outcome = match self.apply_row(product, update.operation, amount).await {
                Ok(stock) => BulkRowOutcome::Updated { stock },
                Err(row_error) => {
                    warn!(
                        %product,
                        operation = ?update.operation,
                        amount,
                        error = %row_error,
                        "bulk stock update row failed"
                    );

                    BulkRowOutcome::Failed {
                        reason: row_error.to_string(),
                    }
                }
            };

            report.rows.push(BulkRowResult {
                product_uuid: product,
                outcome,
            });
        }

        info!(
            operation = ?update.operation,
            amount,
            rows = report.rows.len(),
            failed = report.failed_count(),
            "bulk stock update applied"
        );

        Ok(report)
    }

    async fn list_stock(&self, page: PageRequest) -> Result<StockPage, InventoryServiceError> {
        let threshold = self.low_stock_threshold;
        let products = self.products.list_products(page).await?;

        let page = products.map(|product| ProductStock::from_product(&product, threshold));
        let page_counts =
            StockStatusCounts::tally(page.items.iter().map(|row| row.stock_quantity), threshold);

        Ok(StockPage { page, page_counts })
    }

    async fn stock_summary(&self) -> Result<StockStatusCounts, InventoryServiceError> {
        Ok(self
            .keeper
            .ledger()
            .count_by_status(self.low_stock_threshold)
            .await?)
    }
}

#[automock]
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Current stock for one product.
    async fn read_stock(&self, product: ProductUuid) -> Result<u32, InventoryServiceError>;

    /// Overwrite one product's stock.
    async fn set_single_stock(
        &self,
        product: ProductUuid,
        stock: i64,
    ) -> Result<u32, InventoryServiceError>;

    /// Add to one product's stock.
    async fn increment_stock(
        &self,
        product: ProductUuid,
        amount: u32,
    ) -> Result<u32, InventoryServiceError>;

    /// Take from one product's stock; fails rather than going below zero.
    async fn decrement_stock(
        &self,
        product: ProductUuid,
        amount: u32,
    ) -> Result<u32, InventoryServiceError>;

    /// Apply one operation to many products. Rows are independent: a failed
    /// row is recorded in the report and the rest still run.
    async fn apply_bulk_update(
        &self,
        update: BulkStockUpdate,
    ) -> Result<BulkUpdateReport, InventoryServiceError>;

    /// One page of products with their stock status and this page's counts.
    async fn list_stock(&self, page: PageRequest) -> Result<StockPage, InventoryServiceError>;

    /// Stock status counts across the whole catalog.
    async fn stock_summary(&self) -> Result<StockStatusCounts, InventoryServiceError>;
}
