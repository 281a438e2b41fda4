//! Add Cart Line Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockroom_app::domain::{
    carts::models::AddCartLine, customers::CustomerUuid, products::models::ProductUuid,
};

use crate::{
    carts::{errors::into_status_error, models::CartLineResponse},
    extensions::*,
    state::State,
};

/// Add Cart Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartLineRequest {
    pub product_uuid: Uuid,
    pub quantity: u32,
    pub selected_color: Option<String>,
    pub selected_size: Option<String>,
}

impl AddCartLineRequest {
    fn for_customer(self, customer: CustomerUuid) -> AddCartLine {
        AddCartLine {
            customer_uuid: customer,
            product_uuid: ProductUuid::from_uuid(self.product_uuid),
            quantity: self.quantity,
            selected_color: self.selected_color,
            selected_size: self.selected_size,
            unit_price: None,
        }
    }
}

/// Add Cart Line Handler
///
/// Adds a product to the cart. Adding the same product, color and size
/// again grows the existing line instead of creating another.
#[endpoint(
    tags("cart"),
    summary = "Add to Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Cart line created"),
        (status_code = StatusCode::OK, description = "Merged into an existing line"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Out of stock"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.lines.create",
    skip(json, depot, res),
    fields(customer_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartLineRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    tracing::Span::current().record("customer_uuid", tracing::field::display(customer));

    let merged = state
        .app
        .carts
        .add_or_merge_line(json.into_inner().for_customer(customer))
        .await
        .map_err(into_status_error)?;

    let uuid = merged.line.uuid;

    if merged.merged {
        res.status_code(StatusCode::OK);
    } else {
        res.add_header(LOCATION, format!("/cart/lines/{uuid}"), true)
            .or_500("failed to set location header")?
            .status_code(StatusCode::CREATED);
    }

    Ok(Json(merged.line.into()))
}
