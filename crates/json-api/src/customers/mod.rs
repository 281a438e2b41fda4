//! Customers
//!
//! Identity resolution happens upstream; requests arrive with the resolved
//! customer in a header.

pub(crate) mod middleware;
