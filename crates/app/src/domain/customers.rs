//! Customer Identities
//!
//! Customers and their addresses are owned by the identity and address-book
//! services; this crate only ever receives their identifiers.

use crate::uuids::TypedUuid;

/// Customer marker
#[derive(Debug)]
pub struct Customer;

/// Customer UUID, resolved from the authenticated principal by the caller.
pub type CustomerUuid = TypedUuid<Customer>;

/// Address marker
#[derive(Debug)]
pub struct Address;

/// Shipping address UUID
pub type AddressUuid = TypedUuid<Address>;
