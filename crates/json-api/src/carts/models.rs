//! Cart Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockroom_app::domain::carts::models::CartLine;

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// The unique identifier of the cart line
    pub uuid: Uuid,

    /// The product on this line
    pub product_uuid: Uuid,

    /// Units reserved on this line
    pub quantity: u32,

    /// Selected color, if any
    pub selected_color: Option<String>,

    /// Selected size, if any
    pub selected_size: Option<String>,

    /// Unit price captured when the line was created, in base currency
    pub price_at_addition: String,

    /// The date and time the line was created
    pub created_at: String,

    /// The date and time the line was last updated
    pub updated_at: String,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            uuid: line.uuid.into_uuid(),
            product_uuid: line.product_uuid.into_uuid(),
            quantity: line.quantity,
            selected_color: line.selected_color,
            selected_size: line.selected_size,
            price_at_addition: line.price_at_addition.to_string(),
            created_at: line.created_at.to_string(),
            updated_at: line.updated_at.to_string(),
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The customer's cart lines, oldest first
    pub lines: Vec<CartLineResponse>,
}
