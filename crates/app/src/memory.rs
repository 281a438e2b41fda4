//! In-memory store
//!
//! A process-local stand-in for the `PostgreSQL` tables, used by tests and by
//! local demos. Every trait method takes the lock once, so each call behaves
//! like one committed statement; nothing spans calls.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{carts::models::CartLine, orders::models::Order, products::models::Product};

/// Rows held by the in-memory store, in insertion order.
#[derive(Debug, Default)]
pub(crate) struct MemoryTables {
    pub(crate) products: Vec<Product>,
    pub(crate) cart_lines: Vec<CartLine>,
    pub(crate) orders: Vec<Order>,
}

/// Clone-friendly in-memory store; clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<MemoryTables>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn tables(&self) -> MutexGuard<'_, MemoryTables> {
        self.tables.lock().await
    }
}
