//! Remove Cart Line Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use stockroom_app::domain::carts::models::CartLineUuid;

use crate::{
    carts::{errors::into_status_error, models::CartLineResponse},
    extensions::*,
    state::State,
};

/// Remove Cart Line Handler
///
/// Returns the removed line.
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Line",
    responses(
        (status_code = StatusCode::OK, description = "Cart line removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart line not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.lines.delete",
    skip(line, depot),
    fields(
        customer_uuid = tracing::field::Empty,
        line_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    line: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;
    let line = CartLineUuid::from_uuid(line.into_inner());

    let span = tracing::Span::current();

    span.record("customer_uuid", tracing::field::display(customer));
    span.record("line_uuid", tracing::field::display(line));

    let removed = state
        .app
        .carts
        .remove_line(customer, line)
        .await
        .map_err(into_status_error)?;

    tracing::info!(line_uuid = %line, "removed cart line");

    Ok(Json(removed.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use salvo::test::TestClient;

    use stockroom_app::domain::carts::CartsServiceError;

    use crate::test_helpers::{Mocks, TEST_CUSTOMER_UUID, customer_service, make_line};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        customer_service(mocks, Router::with_path("cart/lines/{line}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_returns_200() {
        let uuid = Uuid::now_v7();
        let line = make_line(uuid, Uuid::now_v7(), 1, dec!(1.00));
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_remove_line()
            .once()
            .withf(move |customer, line| {
                *customer == TEST_CUSTOMER_UUID && line.into_uuid() == uuid
            })
            .return_once(move |_, _| Ok(line));

        let res = TestClient::delete(format!("http://example.com/cart/lines/{uuid}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_delete_missing_line_returns_404() {
        let uuid = Uuid::now_v7();
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_remove_line()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/cart/lines/{uuid}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
