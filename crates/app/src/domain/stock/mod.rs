//! Stock Ledger

pub mod errors;
pub mod keeper;
pub mod ledger;
mod memory;
pub mod models;
mod repository;

pub use errors::StockLedgerError;
pub use keeper::StockKeeper;
pub use ledger::{MockStockLedger, PgStockLedger, StockLedger};
pub use models::{StockStatus, StockStatusCounts};
