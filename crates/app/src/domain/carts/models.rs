//! Cart Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{customers::CustomerUuid, products::models::ProductUuid},
    uuids::TypedUuid,
};

/// Cart Line UUID
pub type CartLineUuid = TypedUuid<CartLine>;

/// Cart Line Model
///
/// One `(product, color, size)` selection owned by one customer. Stock is
/// tracked per product, so two variants of the same product draw from the
/// same ledger row.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub uuid: CartLineUuid,
    pub customer_uuid: CustomerUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub selected_color: Option<String>,
    pub selected_size: Option<String>,
    pub price_at_addition: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartLine {
    /// Whether this line has the same variant key as `other`.
    ///
    /// A missing selector and an empty one are the same selection.
    #[must_use]
    pub fn same_variant(&self, other: &NewCartLine) -> bool {
        self.customer_uuid == other.customer_uuid
            && self.product_uuid == other.product_uuid
            && selector(self.selected_color.as_ref()) == selector(other.selected_color.as_ref())
            && selector(self.selected_size.as_ref()) == selector(other.selected_size.as_ref())
    }
}

fn selector(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}

/// A shopper's request to put a product in their cart.
#[derive(Debug, Clone, PartialEq)]
pub struct AddCartLine {
    pub customer_uuid: CustomerUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub selected_color: Option<String>,
    pub selected_size: Option<String>,

    /// Price to capture on the line; the catalog price when `None`.
    pub unit_price: Option<Decimal>,
}

/// New Cart Line Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartLine {
    pub uuid: CartLineUuid,
    pub customer_uuid: CustomerUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub selected_color: Option<String>,
    pub selected_size: Option<String>,
    pub price_at_addition: Decimal,
}

/// Result of a merge-insert.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedLine {
    pub line: CartLine,

    /// `true` when an existing line absorbed the quantity.
    pub merged: bool,
}
