//! Order Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        carts::models::{CartLine, CartLineUuid},
        customers::{AddressUuid, CustomerUuid},
        products::models::ProductUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItem>;

/// Order lifecycle status. Only the admin status operation changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised order status text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub customer_uuid: CustomerUuid,
    pub address_uuid: AddressUuid,
    pub total_amount: Decimal,
    pub shipping_fee: Decimal,
    pub status: OrderStatus,
    pub payment_method: String,
    pub items: Vec<OrderItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub price: Decimal,
    pub selected_color: Option<String>,
    pub selected_size: Option<String>,
}

/// New Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub customer_uuid: CustomerUuid,
    pub address_uuid: AddressUuid,
    pub total_amount: Decimal,
    pub shipping_fee: Decimal,
    pub payment_method: String,
}

/// New Order Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub price: Decimal,
    pub selected_color: Option<String>,
    pub selected_size: Option<String>,
}

/// How the shopper reached checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutMode {
    /// The whole cart is being ordered.
    Cart,

    /// A single line picked from a product page.
    BuyNow,
}

/// One line being ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutLine {
    /// The cart line this came from, if any.
    pub line_uuid: Option<CartLineUuid>,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub price_at_addition: Decimal,
    pub selected_color: Option<String>,
    pub selected_size: Option<String>,
}

impl From<CartLine> for CheckoutLine {
    fn from(line: CartLine) -> Self {
        Self {
            line_uuid: Some(line.uuid),
            product_uuid: line.product_uuid,
            quantity: line.quantity,
            price_at_addition: line.price_at_addition,
            selected_color: line.selected_color,
            selected_size: line.selected_size,
        }
    }
}

/// A checkout request. Amounts are in base currency.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceOrder {
    pub customer_uuid: CustomerUuid,
    pub address_uuid: Option<AddressUuid>,
    pub payment_method: Option<String>,
    pub lines: Vec<CheckoutLine>,
    pub shipping_fee: Decimal,
    pub mode: CheckoutMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_parses_back() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = "refunded".parse::<OrderStatus>();

        assert_eq!(result, Err(UnknownOrderStatus("refunded".to_string())));
    }
}
