//! Place Order Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockroom_app::domain::{
    carts::models::CartLineUuid,
    customers::{AddressUuid, CustomerUuid},
    orders::{
        currency::ExchangeRate,
        models::{CheckoutLine, CheckoutMode, PlaceOrder},
    },
};

use crate::{
    carts::errors::into_status_error as cart_status_error,
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// How the shopper reached checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum CheckoutModeRequest {
    /// Order every line in the cart.
    Cart,

    /// Order a single cart line.
    BuyNow,
}

/// Place Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlaceOrderRequest {
    pub mode: CheckoutModeRequest,

    /// The cart line being bought; required for `buy_now`
    pub line_uuid: Option<Uuid>,

    pub address_uuid: Option<Uuid>,
    pub payment_method: Option<String>,

    /// Flat shipping fee, in the display currency
    pub shipping_fee: String,

    /// Base to display currency rate the fee was shown in; base currency when omitted
    pub exchange_rate: Option<String>,
}

fn parse_amount(value: &str, brief: &str) -> Result<Decimal, StatusError> {
    value.trim().parse::<Decimal>().or_400(brief)
}

fn base_shipping_fee(request: &PlaceOrderRequest) -> Result<Decimal, StatusError> {
    let fee = parse_amount(&request.shipping_fee, "Invalid shipping_fee")?;

    let rate = match request.exchange_rate.as_deref() {
        Some(rate) => ExchangeRate::new(parse_amount(rate, "Invalid exchange_rate")?)
            .ok_or_else(|| StatusError::bad_request().brief("Invalid exchange_rate"))?,
        None => ExchangeRate::BASE,
    };

    rate.to_base(fee)
        .ok_or_else(|| StatusError::bad_request().brief("Invalid shipping_fee: out of range"))
}

async fn checkout_lines(
    state: &State,
    customer: CustomerUuid,
    request: &PlaceOrderRequest,
) -> Result<(CheckoutMode, Vec<CheckoutLine>), StatusError> {
    match request.mode {
        CheckoutModeRequest::Cart => {
            let lines = state
                .app
                .carts
                .list_lines(customer)
                .await
                .map_err(cart_status_error)?;

            Ok((
                CheckoutMode::Cart,
                lines.into_iter().map(CheckoutLine::from).collect(),
            ))
        }
        CheckoutModeRequest::BuyNow => {
            let line = request
                .line_uuid
                .ok_or_else(|| StatusError::bad_request().brief("Invalid line_uuid: required"))?;

            let line = state
                .app
                .carts
                .get_line(customer, CartLineUuid::from_uuid(line))
                .await
                .map_err(cart_status_error)?;

            Ok((CheckoutMode::BuyNow, vec![line.into()]))
        }
    }
}

/// Place Order Handler
///
/// Turns the cart, or one line of it, into an order. Stock is not checked
/// again here; it was taken when the cart was edited.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart line not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Order not completed"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(customer_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<PlaceOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;
    let request = json.into_inner();

    tracing::Span::current().record("customer_uuid", tracing::field::display(customer));

    let shipping_fee = base_shipping_fee(&request)?;
    let (mode, lines) = checkout_lines(state, customer, &request).await?;

    let order = state
        .app
        .orders
        .place_order(PlaceOrder {
            customer_uuid: customer,
            address_uuid: request.address_uuid.map(AddressUuid::from_uuid),
            payment_method: request.payment_method,
            lines,
            shipping_fee,
            mode,
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
