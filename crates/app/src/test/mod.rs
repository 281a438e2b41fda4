//! Test support shared by the service and repository tests.

mod context;
pub(crate) mod db;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
