//! Customer identity middleware.

use salvo::prelude::*;
use stockroom_app::domain::customers::CustomerUuid;

use crate::extensions::*;

/// Header carrying the customer resolved by the identity layer.
pub(crate) const CUSTOMER_HEADER: &str = "x-customer-uuid";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(customer) = extract_customer(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid X-Customer-Uuid header"));
        ctrl.skip_rest();

        return;
    };

    depot.insert_customer_uuid(customer);

    ctrl.call_next(req, depot, res).await;
}

fn extract_customer(req: &Request) -> Option<CustomerUuid> {
    req.headers()
        .get(CUSTOMER_HEADER)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    #[salvo::handler]
    async fn echo_customer(depot: &mut Depot, res: &mut Response) {
        let customer = depot
            .customer_uuid_or_401()
            .ok()
            .map_or_else(|| "missing".to_string(), |uuid| uuid.to_string());

        res.render(customer);
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(handler)
                .push(Router::new().get(echo_customer)),
        )
    }

    #[tokio::test]
    async fn test_missing_header_returns_401() {
        let res = TestClient::get("http://example.com")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_malformed_header_returns_401() {
        let res = TestClient::get("http://example.com")
            .add_header(CUSTOMER_HEADER, "not-a-uuid", true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_valid_header_injects_customer() -> TestResult {
        let customer = Uuid::now_v7();

        let mut res = TestClient::get("http://example.com")
            .add_header(CUSTOMER_HEADER, customer.to_string(), true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, customer.to_string());

        Ok(())
    }
}
