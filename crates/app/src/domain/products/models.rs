//! Product Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
///
/// `stock_quantity` is the Stock Ledger value for this product and is only
/// mutated through [`crate::domain::stock::StockLedger`].
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub uuid: ProductUuid,
    pub price: Decimal,
    pub stock_quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub price: Decimal,
    pub stock_quantity: u32,
}
