//! Admin
//!
//! Back-office routes. Operator authentication is handled in front of this
//! service.

pub(crate) mod inventory;
pub(crate) mod orders;
