//! Single Product Stock Handler

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

use stockroom_app::domain::products::models::ProductUuid;

use crate::{
    admin::inventory::{errors::into_status_error, models::StockLevelResponse},
    extensions::*,
    state::State,
};

/// What to do with the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum StockEdit {
    /// Overwrite the stock count.
    Set,

    /// Add to the stock count.
    Increment,

    /// Take from the stock count; refused rather than going below zero.
    Decrement,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStockRequest {
    pub operation: StockEdit,
    pub amount: i64,
}

fn unit_count(amount: i64) -> Result<u32, StatusError> {
    u32::try_from(amount).or_400("Invalid amount: must be a non-negative count")
}

/// Single Product Stock Handler
#[endpoint(
    tags("admin"),
    summary = "Edit Product Stock",
    responses(
        (status_code = StatusCode::OK, description = "Stock updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock to decrement"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "admin.inventory.update",
    skip(product, json, depot),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateStockRequest>,
    depot: &mut Depot,
) -> Result<Json<StockLevelResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = ProductUuid::from_uuid(product.into_inner());
    let request = json.into_inner();

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    let inventory = &state.app.inventory;

    let stock = match request.operation {
        StockEdit::Set => inventory.set_single_stock(product, request.amount).await,
        StockEdit::Increment => {
            inventory
                .increment_stock(product, unit_count(request.amount)?)
                .await
        }
        StockEdit::Decrement => {
            inventory
                .decrement_stock(product, unit_count(request.amount)?)
                .await
        }
    }
    .map_err(into_status_error)?;

    Ok(Json(StockLevelResponse {
        product_uuid: product.into_uuid(),
        stock_quantity: stock,
    }))
}
