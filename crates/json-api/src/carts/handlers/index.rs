//! Cart Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{
        errors::into_status_error,
        models::{CartLineResponse, CartResponse},
    },
    extensions::*,
    state::State,
};

/// Cart Index Handler
///
/// Returns the customer's cart lines.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart lines"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown customer"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let lines = state
        .app
        .carts
        .list_lines(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse {
        lines: lines.into_iter().map(CartLineResponse::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use stockroom_app::domain::{carts::CartsServiceError, stock::StockLedgerError};

    use crate::test_helpers::{Mocks, TEST_CUSTOMER_UUID, customer_service, make_line};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        customer_service(mocks, Router::with_path("cart").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_customer_lines() -> TestResult {
        let mut mocks = Mocks::default();
        let line = make_line(Uuid::now_v7(), Uuid::now_v7(), 2, dec!(4.50));
        let line_uuid = line.uuid.into_uuid();

        mocks
            .carts
            .expect_list_lines()
            .once()
            .withf(|customer| *customer == TEST_CUSTOMER_UUID)
            .return_once(move |_| Ok(vec![line]));

        let response: CartResponse = TestClient::get("http://example.com/cart")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        let [line] = response.lines.as_slice() else {
            panic!("expected one line, got {:?}", response.lines);
        };

        assert_eq!(line.uuid, line_uuid);
        assert_eq!(line.price_at_addition, "4.50");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_list_lines()
            .once()
            .return_once(|_| Err(CartsServiceError::Ledger(StockLedgerError::InvalidData)));

        let res = TestClient::get("http://example.com/cart")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
