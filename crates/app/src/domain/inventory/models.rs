//! Inventory Models

use clap::ValueEnum;
use rust_decimal::Decimal;

use crate::{
    domain::{
        products::models::{Product, ProductUuid},
        stock::{StockStatus, StockStatusCounts},
    },
    pagination::Page,
};

/// What a bulk update does to each selected product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BulkOperation {
    /// Overwrite stock with the amount.
    Set,

    /// Add the amount to stock.
    Add,

    /// Subtract the amount, flooring at zero. Flooring is not a failure.
    Subtract,
}

/// A bulk stock update over a set of products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkStockUpdate {
    pub products: Vec<ProductUuid>,
    pub operation: BulkOperation,
    pub amount: i64,
}

/// Outcome for one product of a bulk update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkRowOutcome {
    Updated { stock: u32 },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkRowResult {
    pub product_uuid: ProductUuid,
    pub outcome: BulkRowOutcome,
}

/// Per-product results of a bulk update, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkUpdateReport {
    pub rows: Vec<BulkRowResult>,
}

impl BulkUpdateReport {
    /// Rows that failed.
    pub fn failures(&self) -> impl Iterator<Item = &BulkRowResult> {
        self.rows
            .iter()
            .filter(|row| matches!(row.outcome, BulkRowOutcome::Failed { .. }))
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed_count() == 0
    }
}

/// A product's stock as shown in the admin listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductStock {
    pub product_uuid: ProductUuid,
    pub price: Decimal,
    pub stock_quantity: u32,
    pub status: StockStatus,
}

impl ProductStock {
    #[must_use]
    pub fn from_product(product: &Product, low_threshold: u32) -> Self {
        Self {
            product_uuid: product.uuid,
            price: product.price,
            stock_quantity: product.stock_quantity,
            status: StockStatus::classify(product.stock_quantity, low_threshold),
        }
    }
}

/// One page of the admin stock listing.
///
/// `page_counts` only covers the rows on this page; use the stock summary
/// for whole-catalog figures.
#[derive(Debug, Clone, PartialEq)]
pub struct StockPage {
    pub page: Page<ProductStock>,
    pub page_counts: StockStatusCounts,
}
