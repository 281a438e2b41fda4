//! Stock Models

use serde::Serialize;

/// Stock classification of a single product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Classify a stock value. Zero is out of stock, anything up to and
    /// including `low_threshold` is low.
    #[must_use]
    pub fn classify(stock: u32, low_threshold: u32) -> Self {
        if stock == 0 {
            Self::OutOfStock
        } else if stock <= low_threshold {
            Self::LowStock
        } else {
            Self::InStock
        }
    }
}

/// Products per stock status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StockStatusCounts {
    pub total: u64,
    pub in_stock: u64,
    pub low_stock: u64,
    pub out_of_stock: u64,
}

impl StockStatusCounts {
    /// Count the given stock values.
    pub fn tally(stocks: impl IntoIterator<Item = u32>, low_threshold: u32) -> Self {
        stocks
            .into_iter()
            .fold(Self::default(), |mut counts, stock| {
                counts.total += 1;

                match StockStatus::classify(stock, low_threshold) {
                    StockStatus::InStock => counts.in_stock += 1,
                    StockStatus::LowStock => counts.low_stock += 1,
                    StockStatus::OutOfStock => counts.out_of_stock += 1,
                }

                counts
            })
    }
}
