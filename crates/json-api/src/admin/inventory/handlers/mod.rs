//! Admin Inventory Handlers

pub(crate) mod bulk;
pub(crate) mod index;
pub(crate) mod summary;
pub(crate) mod update;
