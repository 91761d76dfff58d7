//! In-memory reservation store and catalog

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{
    CatalogProvider, NewReservation, Reservation, ReservationPatch, ReservationQuery,
    ReservationStore, SortDirection, Vehicle,
};
use crate::shared::errors::StoreError;

/// In-memory reservation store for development and testing
pub struct InMemoryReservationStore {
    reservations: DashMap<String, Reservation>,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self {
            reservations: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }
}

impl Default for InMemoryReservationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn create(&self, reservation: NewReservation) -> Result<Reservation, StoreError> {
        let id = Uuid::new_v4().to_string();
        let record = Reservation::from_new(reservation, id.clone(), Utc::now());
        self.reservations.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, patch: ReservationPatch) -> Result<(), StoreError> {
        let mut entry = self
            .reservations
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Reservation",
                id: id.to_string(),
            })?;

        // the entry guard holds the shard lock across check and write
        if !patch.applies_to(entry.status) {
            return Err(StoreError::StatusConflict {
                id: id.to_string(),
                expected: patch.expected_status.unwrap_or(entry.status),
                actual: entry.status,
            });
        }
        patch.apply(&mut *entry);
        Ok(())
    }

    async fn query(&self, query: &ReservationQuery) -> Result<Vec<Reservation>, StoreError> {
        let mut found: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|e| query.matches(e.value()))
            .map(|e| e.value().clone())
            .collect();

        // id breaks created_at ties, same as the SQL store
        found.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        if query.order == SortDirection::Descending {
            found.reverse();
        }

        let limit = query.limit.map_or(usize::MAX, |l| l as usize);
        Ok(found.into_iter().take(limit).collect())
    }
}

/// In-memory vehicle catalog
pub struct InMemoryCatalog {
    vehicles: DashMap<String, Vehicle>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            vehicles: DashMap::new(),
        }
    }

    /// Add or replace a vehicle
    pub fn insert(&self, vehicle: Vehicle) {
        self.vehicles.insert(vehicle.id.clone(), vehicle);
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Vehicle> for InMemoryCatalog {
    fn from_iter<T: IntoIterator<Item = Vehicle>>(iter: T) -> Self {
        let catalog = Self::new();
        for vehicle in iter {
            catalog.insert(vehicle);
        }
        catalog
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn resolve(&self, vehicle_id: &str) -> Result<Option<Vehicle>, StoreError> {
        Ok(self.vehicles.get(vehicle_id).map(|v| v.clone()))
    }
}

// ── Tests ──────────────────────────────────────────────────────
