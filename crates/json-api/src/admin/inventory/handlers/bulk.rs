//! Bulk Stock Update Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockroom_app::domain::{
    inventory::models::{BulkOperation, BulkStockUpdate},
    products::models::ProductUuid,
};

use crate::{
    admin::inventory::{errors::into_status_error, models::BulkRowResponse},
    extensions::*,
    state::State,
};

/// Operation applied to every selected product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum BulkOperationRequest {
    Set,
    Add,
    Subtract,
}

impl From<BulkOperationRequest> for BulkOperation {
    fn from(operation: BulkOperationRequest) -> Self {
        match operation {
            BulkOperationRequest::Set => Self::Set,
            BulkOperationRequest::Add => Self::Add,
            BulkOperationRequest::Subtract => Self::Subtract,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BulkUpdateRequest {
    pub product_uuids: Vec<Uuid>,
    pub operation: BulkOperationRequest,
    pub amount: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BulkUpdateResponse {
    /// One entry per product, in request order
    pub rows: Vec<BulkRowResponse>,

    /// Number of rows that failed
    pub failed: usize,
}

/// Bulk Stock Update Handler
///
/// Every product is attempted. The response lists per-product failures
/// rather than failing the whole request.
#[endpoint(
    tags("admin"),
    summary = "Bulk Stock Update",
    responses(
        (status_code = StatusCode::OK, description = "Batch attempted; see per-row results"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "admin.inventory.bulk", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<BulkUpdateRequest>,
    depot: &mut Depot,
) -> Result<Json<BulkUpdateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let report = state
        .app
        .inventory
        .apply_bulk_update(BulkStockUpdate {
            products: request
                .product_uuids
                .into_iter()
                .map(ProductUuid::from_uuid)
                .collect(),
            operation: request.operation.into(),
            amount: request.amount,
        })
        .await
        .map_err(into_status_error)?;

    let failed = report.failed_count();

    Ok(Json(BulkUpdateResponse {
        rows: report.rows.into_iter().map(BulkRowResponse::from).collect(),
        failed,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use stockroom_app::domain::inventory::{
        InventoryServiceError,
        models::{BulkRowOutcome, BulkRowResult, BulkUpdateReport},
    };

    use crate::test_helpers::{Mocks, admin_service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        admin_service(
            mocks,
            Router::with_path("admin/inventory/bulk").post(handler),
        )
    }

    #[tokio::test]
    async fn test_partial_failure_still_returns_200_with_failures() -> TestResult {
        let ok = Uuid::now_v7();
        let missing = Uuid::now_v7();
        let mut mocks = Mocks::default();

        mocks
            .inventory
            .expect_apply_bulk_update()
            .once()
            .withf(|update| update.operation == BulkOperation::Subtract && update.amount == 2)
            .return_once(move |_| {
                Ok(BulkUpdateReport {
                    rows: vec![
                        BulkRowResult {
                            product_uuid: ProductUuid::from_uuid(ok),
                            outcome: BulkRowOutcome::Updated { stock: 0 },
                        },
                        BulkRowResult {
                            product_uuid: ProductUuid::from_uuid(missing),
                            outcome: BulkRowOutcome::Failed {
                                reason: "product not found".to_string(),
                            },
                        },
                    ],
                })
            });

        let mut res = TestClient::post("http://example.com/admin/inventory/bulk")
            .json(&json!({
                "product_uuids": [ok, missing],
                "operation": "subtract",
                "amount": 2,
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: BulkUpdateResponse = res.take_json().await?;

        assert_eq!(body.failed, 1);
        assert_eq!(
            body.rows
                .iter()
                .map(|row| (row.product_uuid, row.stock_quantity, row.error.is_some()))
                .collect::<Vec<_>>(),
            vec![(ok, Some(0), false), (missing, None, true)]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_negative_amount_returns_400() {
        let mut mocks = Mocks::default();

        mocks
            .inventory
            .expect_apply_bulk_update()
            .once()
            .return_once(|_| {
                Err(InventoryServiceError::InvalidArgument {
                    field: "amount",
                    reason: "must not be negative",
                })
            });

        let res = TestClient::post("http://example.com/admin/inventory/bulk")
            .json(&json!({
                "product_uuids": [Uuid::now_v7()],
                "operation": "set",
                "amount": -5,
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_unknown_operation_returns_400() {
        let mut mocks = Mocks::default();

        mocks.inventory.expect_apply_bulk_update().never();

        let res = TestClient::post("http://example.com/admin/inventory/bulk")
            .json(&json!({
                "product_uuids": [Uuid::now_v7()],
                "operation": "multiply",
                "amount": 2,
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
