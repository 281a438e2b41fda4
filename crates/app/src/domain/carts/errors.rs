//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{products::ProductsServiceError, stock::StockLedgerError};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart line not found")]
    NotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("invalid {field}: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: &'static str,
    },

    #[error("out of stock: only {available} available")]
    OutOfStock { available: u32 },

    #[error("cart line already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("catalog error")]
    Catalog(#[source] ProductsServiceError),

    #[error("stock ledger error")]
    Ledger(#[source] StockLedgerError),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<StockLedgerError> for CartsServiceError {
    fn from(error: StockLedgerError) -> Self {
        match error {
            StockLedgerError::NotFound => Self::ProductNotFound,
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

impl From<ProductsServiceError> for CartsServiceError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::NotFound => Self::ProductNotFound,
            other => Self::Catalog(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_out_of_stock_keeps_available_quantity() {
        let error = CartsServiceError::from(StockLedgerError::OutOfStock { available: 1 });

        assert_eq!(error.to_string(), "out of stock: only 1 available");
    }

    #[test]
    fn missing_ledger_row_is_a_missing_product() {
        let error = CartsServiceError::from(StockLedgerError::NotFound);

        assert!(
            matches!(error, CartsServiceError::ProductNotFound),
            "expected ProductNotFound, got {error:?}"
        );
    }
}
