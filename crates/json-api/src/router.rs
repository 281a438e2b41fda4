//! Routes

use salvo::prelude::*;

use crate::{admin, carts, customers, orders};

/// Customer and admin routes.
///
/// Customer routes sit behind the identity middleware; admin routes do not.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::new()
                .hoop(customers::middleware::handler)
                .push(
                    Router::with_path("cart")
                        .get(carts::index::handler)
                        .push(
                            Router::with_path("lines")
                                .post(carts::create::handler)
                                .push(
                                    Router::with_path("{line}")
                                        .put(carts::update::handler)
                                        .delete(carts::delete::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler)
                        .push(Router::with_path("{order}").get(orders::get::handler)),
                ),
        )
        .push(
            Router::with_path("admin")
                .push(
                    Router::with_path("inventory")
                        .get(admin::inventory::index::handler)
                        .push(Router::with_path("summary").get(admin::inventory::summary::handler))
                        .push(Router::with_path("bulk").post(admin::inventory::bulk::handler))
                        .push(Router::with_path("{product}").put(admin::inventory::update::handler)),
                )
                .push(
                    Router::with_path("orders/{order}/status")
                        .put(admin::orders::status::handler),
                ),
        )
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use stockroom_app::{
        context::AppContext,
        domain::{
            policies::InventoryPolicies,
            products::models::{NewProduct, ProductUuid},
        },
    };

    use crate::{
        carts::models::CartLineResponse, customers::middleware::CUSTOMER_HEADER, state::State,
    };

    use super::*;

    fn make_service(app: AppContext) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(State::from_app_context(app)))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_customer_routes_require_identity() {
        let service = make_service(AppContext::in_memory(InventoryPolicies::default()));

        let res = TestClient::get("http://example.com/cart")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_admin_routes_skip_identity() {
        let service = make_service(AppContext::in_memory(InventoryPolicies::default()));

        let res = TestClient::get("http://example.com/admin/inventory/summary")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_resizing_a_line_reserves_stock() -> TestResult {
        let app = AppContext::in_memory(InventoryPolicies::default());
        let service = make_service(app.clone());
        let customer = Uuid::now_v7().to_string();

        let product = app
            .products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                price: dec!(4.00),
                stock_quantity: 8,
            })
            .await?;

        let line: CartLineResponse = TestClient::post("http://example.com/cart/lines")
            .add_header(CUSTOMER_HEADER, customer.clone(), true)
            .json(&json!({ "product_uuid": product.uuid.into_uuid(), "quantity": 1 }))
            .send(&service)
            .await
            .take_json()
            .await?;

        let res = TestClient::put(format!("http://example.com/cart/lines/{}", line.uuid))
            .add_header(CUSTOMER_HEADER, customer, true)
            .json(&json!({ "quantity": 3 }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(app.inventory.read_stock(product.uuid).await?, 6);

        Ok(())
    }
}
