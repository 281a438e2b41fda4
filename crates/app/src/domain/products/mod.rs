//! Products
//!
//! Read access to the catalog: the price and stock of a product. Catalog
//! editing lives elsewhere; `create_product` exists to seed rows.

pub mod errors;
mod memory;
pub mod models;
mod repository;
pub mod service;

pub use errors::ProductsServiceError;
pub use service::*;
