//! Inventory-consistency domain, persistence and wiring shared by the
//! Stockroom binaries.

pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod logging;
pub mod memory;
pub mod pagination;
pub mod uuids;

#[cfg(test)]
mod test;
