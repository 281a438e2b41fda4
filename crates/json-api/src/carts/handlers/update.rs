//! Set Cart Line Quantity Handler

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

use stockroom_app::domain::carts::models::CartLineUuid;

use crate::{
    carts::{errors::into_status_error, models::CartLineResponse},
    extensions::*,
    state::State,
};

/// Set Cart Line Quantity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetQuantityRequest {
    /// New quantity; at least 1. Use the delete endpoint to remove a line.
    pub quantity: u32,
}

/// Set Cart Line Quantity Handler
#[endpoint(
    tags("cart"),
    summary = "Set Cart Line Quantity",
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart line not found"),
        (status_code = StatusCode::CONFLICT, description = "Out of stock"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.lines.update",
    skip(line, json, depot),
    fields(
        customer_uuid = tracing::field::Empty,
        line_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    line: PathParam<Uuid>,
    json: JsonBody<SetQuantityRequest>,
    depot: &mut Depot,
) -> Result<Json<CartLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;
    let line = CartLineUuid::from_uuid(line.into_inner());

    let span = tracing::Span::current();

    span.record("customer_uuid", tracing::field::display(customer));
    span.record("line_uuid", tracing::field::display(line));

    let updated = state
        .app
        .carts
        .set_line_quantity(customer, line, json.into_inner().quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
