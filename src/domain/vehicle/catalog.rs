//! Catalog provider interface

use async_trait::async_trait;

use super::model::Vehicle;
use crate::shared::errors::StoreError;

/// Read-only access to the vehicle catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Resolve a vehicle by id
    async fn resolve(&self, vehicle_id: &str) -> Result<Option<Vehicle>, StoreError>;
}
