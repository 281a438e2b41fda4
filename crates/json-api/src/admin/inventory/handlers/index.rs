//! Stock Listing Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stockroom_app::pagination::{DEFAULT_PER_PAGE, PageRequest};

use crate::{
    admin::inventory::{
        errors::into_status_error,
        models::{ProductStockResponse, StockCountsResponse},
    },
    extensions::*,
    state::State,
};

/// Stock Listing Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StockListingResponse {
    pub items: Vec<ProductStockResponse>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,

    /// Status counts for the rows on this page only
    pub page_counts: StockCountsResponse,
}

/// Stock Listing Handler
///
/// One page of products with their stock status.
#[endpoint(tags("admin"), summary = "List Stock")]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    per_page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<StockListingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = PageRequest::new(
        page.into_inner().unwrap_or(1),
        per_page.into_inner().unwrap_or(DEFAULT_PER_PAGE),
    );

    let listing = state
        .app
        .inventory
        .list_stock(request)
        .await
        .map_err(into_status_error)?;

    Ok(Json(StockListingResponse {
        page: listing.page.page,
        per_page: listing.page.per_page,
        total: listing.page.total,
        items: listing
            .page
            .items
            .into_iter()
            .map(ProductStockResponse::from)
            .collect(),
        page_counts: listing.page_counts.into(),
    }))
}
