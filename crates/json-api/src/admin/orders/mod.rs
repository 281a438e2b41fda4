//! Admin Orders

mod handlers;

pub(crate) use handlers::*;
