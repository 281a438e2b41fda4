//! Admin Order Handlers

pub(crate) mod status;
