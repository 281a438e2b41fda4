//! Carts

pub mod errors;
mod memory;
pub mod models;
pub mod repository;
pub mod service;

pub use errors::CartsServiceError;
pub use repository::{CartLinesRepository, PgCartLinesRepository};
pub use service::*;
