//! Stockroom Domain Concerns

pub mod carts;
pub mod customers;
pub mod inventory;
pub mod orders;
pub mod policies;
pub mod products;
pub mod stock;
