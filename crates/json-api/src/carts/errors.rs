//! Errors

use salvo::http::StatusError;
use tracing::error;

use stockroom_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart line not found"),
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::InvalidArgument { field, reason } => {
            StatusError::bad_request().brief(format!("Invalid {field}: {reason}"))
        }
        CartsServiceError::OutOfStock { available } => {
            StatusError::conflict().brief(format!("Out of stock: only {available} available"))
        }
        CartsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Cart line already exists")
        }
        CartsServiceError::InvalidReference | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart line payload")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage failed: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Catalog(source) => {
            error!("catalog lookup failed: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Ledger(source) => {
            error!("stock ledger failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
