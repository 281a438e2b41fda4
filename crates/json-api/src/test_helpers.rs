//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use stockroom_app::{
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            models::{CartLine, CartLineUuid},
        },
        customers::{AddressUuid, CustomerUuid},
        inventory::MockInventoryService,
        orders::{
            MockOrdersService,
            models::{Order, OrderItem, OrderItemUuid, OrderStatus, OrderUuid},
        },
        products::{MockProductsService, models::ProductUuid},
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_CUSTOMER_UUID: CustomerUuid = CustomerUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_customer_uuid(TEST_CUSTOMER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// Service mocks; any call without an expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub products: MockProductsService,
    pub carts: MockCartsService,
    pub orders: MockOrdersService,
    pub inventory: MockInventoryService,
}

impl Mocks {
    fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            inventory: Arc::new(self.inventory),
        })
    }
}

/// A service for customer routes, with the test customer already resolved.
pub(crate) fn customer_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_customer)
            .push(route),
    )
}

/// A service for admin routes.
pub(crate) fn admin_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

pub(crate) fn make_line(uuid: Uuid, product: Uuid, quantity: u32, price: Decimal) -> CartLine {
    CartLine {
        uuid: CartLineUuid::from_uuid(uuid),
        customer_uuid: TEST_CUSTOMER_UUID,
        product_uuid: ProductUuid::from_uuid(product),
        quantity,
        selected_color: None,
        selected_size: None,
        price_at_addition: price,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: Uuid, status: OrderStatus) -> Order {
    let order_uuid = OrderUuid::from_uuid(uuid);

    Order {
        uuid: order_uuid,
        customer_uuid: TEST_CUSTOMER_UUID,
        address_uuid: AddressUuid::from_uuid(Uuid::nil()),
        total_amount: Decimal::new(1_250, 2),
        shipping_fee: Decimal::new(250, 2),
        status,
        payment_method: "card".to_string(),
        items: vec![OrderItem {
            uuid: OrderItemUuid::new(),
            order_uuid,
            product_uuid: ProductUuid::new(),
            quantity: 2,
            price: Decimal::new(500, 2),
            selected_color: None,
            selected_size: None,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
