//! Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockroom_app::domain::orders::models::{OrderStatus, OrderUuid};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// pending, processing, shipped, delivered or cancelled
    pub status: String,
}

/// Order Status Handler
///
/// Moves an order to a new status. Cancelling an order does not return its
/// items to stock.
#[endpoint(
    tags("admin"),
    summary = "Update Order Status",
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "admin.orders.status",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order = OrderUuid::from_uuid(order.into_inner());

    tracing::Span::current().record("order_uuid", tracing::field::display(order));

    let status: OrderStatus = json.into_inner().status.parse().or_400("Invalid status")?;

    let updated = state
        .app
        .orders
        .update_status(order, status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use stockroom_app::domain::orders::OrdersServiceError;

    use crate::test_helpers::{Mocks, admin_service, make_order};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        admin_service(
            mocks,
            Router::with_path("admin/orders/{order}/status").put(handler),
        )
    }

    #[tokio::test]
    async fn test_cancel_returns_updated_order() -> TestResult {
        let uuid = Uuid::now_v7();
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_update_status()
            .once()
            .withf(move |order, status| {
                order.into_uuid() == uuid && *status == OrderStatus::Cancelled
            })
            .return_once(move |_, status| Ok(make_order(uuid, status)));

        let response: OrderResponse =
            TestClient::put(format!("http://example.com/admin/orders/{uuid}/status"))
                .json(&json!({ "status": "cancelled" }))
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(response.uuid, uuid);
        assert_eq!(response.status, "cancelled");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() {
        let mut mocks = Mocks::default();

        mocks.orders.expect_update_status().never();

        let res = TestClient::put(format!(
            "http://example.com/admin/orders/{}/status",
            Uuid::now_v7()
        ))
        .json(&json!({ "status": "lost" }))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_missing_order_returns_404() {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_update_status()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::put(format!(
            "http://example.com/admin/orders/{}/status",
            Uuid::now_v7()
        ))
        .json(&json!({ "status": "shipped" }))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
