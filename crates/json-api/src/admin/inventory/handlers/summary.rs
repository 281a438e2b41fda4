//! Stock Summary Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    admin::inventory::{errors::into_status_error, models::StockCountsResponse},
    extensions::*,
    state::State,
};

/// Stock Summary Handler
///
/// Status counts across the whole catalog.
#[endpoint(tags("admin"), summary = "Stock Summary")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StockCountsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let counts = state
        .app
        .inventory
        .stock_summary()
        .await
        .map_err(into_status_error)?;

    Ok(Json(counts.into()))
}
