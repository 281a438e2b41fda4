//! Errors

use salvo::http::StatusError;
use tracing::error;

use stockroom_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::InvalidArgument { field, reason } => {
            StatusError::bad_request().brief(format!("Invalid {field}: {reason}"))
        }
        OrdersServiceError::PartialCommit { order } => {
            error!(order_uuid = %order.uuid, "order left partially committed");

            StatusError::internal_server_error().brief("The order could not be completed")
        }
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
