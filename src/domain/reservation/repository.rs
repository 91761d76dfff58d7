//! Reservation store interface
//!
//! The engine speaks three verbs to its document store: `create`, `update`
//! and `query`. Reads by id are queries with an id filter.

use async_trait::async_trait;

use super::model::{NewReservation, Reservation, ReservationPatch};
use super::status::ReservationStatus;
use crate::shared::errors::StoreError;

/// Ordering on `created_at`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// Filters and ordering for `ReservationStore::query`.
///
/// Empty `statuses` means any status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationQuery {
    pub id: Option<String>,
    pub principal_id: Option<String>,
    pub vehicle_id: Option<String>,
    pub statuses: Vec<ReservationStatus>,
    pub order: SortDirection,
    pub limit: Option<u64>,
}

impl ReservationQuery {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            limit: Some(1),
            ..Self::default()
        }
    }

    pub fn for_principal(principal_id: impl Into<String>) -> Self {
        Self {
            principal_id: Some(principal_id.into()),
            ..Self::default()
        }
    }

    pub fn for_vehicle(mut self, vehicle_id: impl Into<String>) -> Self {
        self.vehicle_id = Some(vehicle_id.into());
        self
    }

    pub fn with_statuses(mut self, statuses: &[ReservationStatus]) -> Self {
        self.statuses = statuses.to_vec();
        self
    }

    pub fn order(mut self, order: SortDirection) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a record passes every filter (ordering and limit aside)
    pub fn matches(&self, r: &Reservation) -> bool {
        self.id.as_deref().is_none_or(|id| r.id == id)
            && self
                .principal_id
                .as_deref()
                .is_none_or(|p| r.principal_id == p)
            && self
                .vehicle_id
                .as_deref()
                .is_none_or(|v| r.vehicle_id == v)
            && (self.statuses.is_empty() || self.statuses.contains(&r.status))
    }
}

#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Persist a new reservation; the store assigns `id` and `created_at`
    async fn create(&self, reservation: NewReservation) -> Result<Reservation, StoreError>;

    /// Apply a partial update to an existing reservation.
    ///
    /// Honors `ReservationPatch::expected_status` atomically, failing with
    /// `StoreError::StatusConflict` when the record has moved on.
    async fn update(&self, id: &str, patch: ReservationPatch) -> Result<(), StoreError>;

    async fn query(&self, query: &ReservationQuery) -> Result<Vec<Reservation>, StoreError>;

    /// Fresh read of a single reservation
    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>, StoreError> {
        Ok(self
            .query(&ReservationQuery::by_id(id))
            .await?
            .into_iter()
            .next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation::model::tests::sample_new;
    use chrono::Utc;

    #[test]
    fn query_filters() {
        let r = Reservation::from_new(sample_new(), "res-1".into(), Utc::now());

        assert!(ReservationQuery::default().matches(&r));
        assert!(ReservationQuery::by_id("res-1").matches(&r));
        assert!(!ReservationQuery::by_id("res-2").matches(&r));
        assert!(ReservationQuery::for_principal("user-a").matches(&r));
        assert!(!ReservationQuery::for_principal("user-b").matches(&r));
        assert!(!ReservationQuery::for_principal("user-a")
            .for_vehicle("car2")
            .matches(&r));
        assert!(ReservationQuery::for_principal("user-a")
            .with_statuses(&[ReservationStatus::Pending, ReservationStatus::Confirmed])
            .matches(&r));
        assert!(!ReservationQuery::default()
            .with_statuses(&[ReservationStatus::Cancelled])
            .matches(&r));
    }
}
