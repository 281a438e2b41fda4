//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use stockroom_app::domain::customers::CustomerUuid;

/// Typed access to values stashed in the depot by earlier hoops.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_customer_uuid(&mut self, customer: CustomerUuid);

    fn customer_uuid_or_401(&self) -> Result<CustomerUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_customer_uuid(&mut self, customer: CustomerUuid) {
        self.inject(customer);
    }

    fn customer_uuid_or_401(&self) -> Result<CustomerUuid, StatusError> {
        self.obtain::<CustomerUuid>()
            .copied()
            .map_err(|_missing| StatusError::unauthorized().brief("Unknown customer"))
    }
}
