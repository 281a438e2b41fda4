//! Admin Inventory
//!
//! Operator stock edits outside of any cart or order flow, plus the stock
//! status listing.

pub mod errors;
pub mod models;
pub mod service;

pub use errors::InventoryServiceError;
pub use service::*;
