//! Errors

use salvo::http::StatusError;
use tracing::error;

use stockroom_app::domain::inventory::InventoryServiceError;

pub(crate) fn into_status_error(error: InventoryServiceError) -> StatusError {
    match error {
        InventoryServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        InventoryServiceError::InvalidArgument { field, reason } => {
            StatusError::bad_request().brief(format!("Invalid {field}: {reason}"))
        }
        InventoryServiceError::OutOfStock { available } => {
            StatusError::conflict().brief(format!("Out of stock: only {available} available"))
        }
        error @ InventoryServiceError::BatchPartialFailure { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        InventoryServiceError::Catalog(source) => {
            error!("catalog read failed: {source}");

            StatusError::internal_server_error()
        }
        InventoryServiceError::Ledger(source) => {
            error!("stock ledger failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
