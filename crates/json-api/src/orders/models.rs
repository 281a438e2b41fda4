//! Order Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockroom_app::domain::orders::models::{Order, OrderItem};

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub quantity: u32,

    /// Unit price copied from the cart line, in base currency
    pub price: String,

    pub selected_color: Option<String>,
    pub selected_size: Option<String>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            quantity: item.quantity,
            price: item.price.to_string(),
            selected_color: item.selected_color,
            selected_size: item.selected_size,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Shipping address
    pub address_uuid: Uuid,

    /// Lines plus shipping, in base currency
    pub total_amount: String,

    /// Flat shipping fee, in base currency
    pub shipping_fee: String,

    /// One of pending, processing, shipped, delivered, cancelled
    pub status: String,

    pub payment_method: String,

    pub items: Vec<OrderItemResponse>,

    /// The date and time the order was placed
    pub created_at: String,

    /// The date and time the order was last updated
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            address_uuid: order.address_uuid.into_uuid(),
            total_amount: order.total_amount.to_string(),
            shipping_fee: order.shipping_fee.to_string(),
            status: order.status.to_string(),
            payment_method: order.payment_method,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Orders Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// The customer's orders, newest first
    pub orders: Vec<OrderResponse>,
}
