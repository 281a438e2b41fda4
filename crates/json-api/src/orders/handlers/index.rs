//! Order Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{OrderResponse, OrdersResponse},
    },
    state::State,
};

/// Order Index Handler
///
/// Returns the customer's orders, newest first.
#[endpoint(tags("orders"), summary = "List Orders")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(OrderResponse::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use stockroom_app::domain::orders::models::OrderStatus;

    use crate::test_helpers::{Mocks, TEST_CUSTOMER_UUID, customer_service, make_order};

    use super::*;

    #[tokio::test]
    async fn test_index_returns_orders_in_service_order() -> TestResult {
        let newer = Uuid::now_v7();
        let older = Uuid::now_v7();
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_orders()
            .once()
            .withf(|customer| *customer == TEST_CUSTOMER_UUID)
            .return_once(move |_| {
                Ok(vec![
                    make_order(newer, OrderStatus::Pending),
                    make_order(older, OrderStatus::Shipped),
                ])
            });

        let response: OrdersResponse = TestClient::get("http://example.com/orders")
            .send(&customer_service(
                mocks,
                Router::with_path("orders").get(handler),
            ))
            .await
            .take_json()
            .await?;

        assert_eq!(
            response
                .orders
                .iter()
                .map(|order| order.uuid)
                .collect::<Vec<_>>(),
            vec![newer, older]
        );

        Ok(())
    }
}
