//! Admin Inventory Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockroom_app::domain::{
    inventory::models::{BulkRowOutcome, BulkRowResult, ProductStock},
    stock::{StockStatus, StockStatusCounts},
};

/// Stock classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum StockStatusResponse {
    InStock,
    LowStock,
    OutOfStock,
}

impl From<StockStatus> for StockStatusResponse {
    fn from(status: StockStatus) -> Self {
        match status {
            StockStatus::InStock => Self::InStock,
            StockStatus::LowStock => Self::LowStock,
            StockStatus::OutOfStock => Self::OutOfStock,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct StockCountsResponse {
    pub total: u64,
    pub in_stock: u64,
    pub low_stock: u64,
    pub out_of_stock: u64,
}

impl From<StockStatusCounts> for StockCountsResponse {
    fn from(counts: StockStatusCounts) -> Self {
        Self {
            total: counts.total,
            in_stock: counts.in_stock,
            low_stock: counts.low_stock,
            out_of_stock: counts.out_of_stock,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductStockResponse {
    pub product_uuid: Uuid,

    /// Unit price in base currency
    pub price: String,

    pub stock_quantity: u32,
    pub status: StockStatusResponse,
}

impl From<ProductStock> for ProductStockResponse {
    fn from(row: ProductStock) -> Self {
        Self {
            product_uuid: row.product_uuid.into_uuid(),
            price: row.price.to_string(),
            stock_quantity: row.stock_quantity,
            status: row.status.into(),
        }
    }
}

/// Stock level after an admin edit.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StockLevelResponse {
    pub product_uuid: Uuid,
    pub stock_quantity: u32,
}

/// One product's result within a bulk update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BulkRowResponse {
    pub product_uuid: Uuid,

    /// Stock after the update; absent when the row failed
    pub stock_quantity: Option<u32>,

    /// Why the row failed; absent when it succeeded
    pub error: Option<String>,
}

impl From<BulkRowResult> for BulkRowResponse {
    fn from(row: BulkRowResult) -> Self {
        let (stock_quantity, error) = match row.outcome {
            BulkRowOutcome::Updated { stock } => (Some(stock), None),
            BulkRowOutcome::Failed { reason } => (None, Some(reason)),
        };

        Self {
            product_uuid: row.product_uuid.into_uuid(),
            stock_quantity,
            error,
        }
    }
}
