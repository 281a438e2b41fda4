//! Inventory service errors.

use thiserror::Error;

use crate::domain::{
    inventory::models::BulkUpdateReport,
    products::ProductsServiceError,
    stock::StockLedgerError,
};

#[derive(Debug, Error)]
pub enum InventoryServiceError {
    #[error("product not found")]
    NotFound,

    #[error("invalid {field}: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: &'static str,
    },

    #[error("out of stock: only {available} available")]
    OutOfStock { available: u32 },

    #[error(
        "{} of {} products failed to update",
        .report.failed_count(),
        .report.rows.len()
    )]
    BatchPartialFailure { report: BulkUpdateReport },

    #[error("catalog error")]
    Catalog(#[source] ProductsServiceError),

    #[error("stock ledger error")]
    Ledger(#[source] StockLedgerError),
}

impl From<StockLedgerError> for InventoryServiceError {
    fn from(error: StockLedgerError) -> Self {
        match error {
            StockLedgerError::NotFound => Self::NotFound,
            StockLedgerError::OutOfStock { available } => Self::OutOfStock { available },
            StockLedgerError::InvalidArgument { field, reason } => {
                Self::InvalidArgument { field, reason }
            }
            other @ (StockLedgerError::InvalidData | StockLedgerError::Sql(_)) => {
                Self::Ledger(other)
            }
        }
    }
}

impl From<ProductsServiceError> for InventoryServiceError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::NotFound => Self::NotFound,
            other => Self::Catalog(other),
        }
    }
}

impl BulkUpdateReport {
    /// Turn a report with failed rows into [`InventoryServiceError::BatchPartialFailure`].
    ///
    /// # Errors
    ///
    /// Returns the report inside the error when any row failed.
    pub fn ensure_complete(self) -> Result<Self, InventoryServiceError> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(InventoryServiceError::BatchPartialFailure { report: self })
        }
    }
}
