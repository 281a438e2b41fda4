//! Stock ledger errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StockLedgerError {
    #[error("product not found")]
    NotFound,

    #[error("invalid {field}: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: &'static str,
    },

    #[error("out of stock: only {available} available")]
    OutOfStock { available: u32 },

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for StockLedgerError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(_) | None => Self::Sql(error),
        }
    }
}
