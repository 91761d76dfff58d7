//! Reservation lifecycle transitions
//!
//! Each transition re-reads the record, runs its guard against that fresh
//! status and writes with a conditional patch expecting it. If another
//! transition lands in between, the store refuses the write and the guard
//! runs again on the new status, so a terminal record is never overwritten
//! and a stale copy held by the caller can never authorize a transition.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{Principal, Reservation, ReservationPatch, ReservationStatus, ReservationStore};
use crate::shared::errors::{LifecycleError, StoreError};

pub struct ReservationLifecycle {
    store: Arc<dyn ReservationStore>,
}

impl ReservationLifecycle {
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self { store }
    }

    /// Self-service cancellation by the principal who made the booking
    pub async fn cancel(
        &self,
        reservation_id: &str,
        requester: Option<&Principal>,
    ) -> Result<Reservation, LifecycleError> {
        let requester = requester.ok_or(LifecycleError::Unauthenticated)?;
        self.transition(reservation_id, ReservationStatus::Cancelled, Some(requester))
            .await
    }

    /// Operator acceptance, e.g. at pickup
    pub async fn confirm(&self, reservation_id: &str) -> Result<Reservation, LifecycleError> {
        self.transition(reservation_id, ReservationStatus::Confirmed, None)
            .await
    }

    /// Operator close-out when the vehicle is returned
    pub async fn complete(&self, reservation_id: &str) -> Result<Reservation, LifecycleError> {
        self.transition(reservation_id, ReservationStatus::Completed, None)
            .await
    }

    async fn load(&self, reservation_id: &str) -> Result<Reservation, LifecycleError> {
        self.store
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| LifecycleError::NotFound(reservation_id.to_string()))
    }

    /// `owner`, when given, must own the reservation.
    ///
    /// Statuses only move forward (pending, confirmed, terminal), so a lost
    /// race is retried at most twice before the guard rejects.
    async fn transition(
        &self,
        reservation_id: &str,
        to: ReservationStatus,
        owner: Option<&Principal>,
    ) -> Result<Reservation, LifecycleError> {
        loop {
            let mut reservation = self.load(reservation_id).await?;

            if let Some(owner) = owner {
                if !owner.owns(&reservation.principal_id) {
                    return Err(LifecycleError::Forbidden(reservation_id.to_string()));
                }
            }
            reservation.check_transition(to)?;

            let from = reservation.status;
            let patch = ReservationPatch::transition(from, to);
            match self.store.update(&reservation.id, patch.clone()).await {
                Ok(()) => {}
                Err(StoreError::StatusConflict { actual, .. }) => {
                    debug!(
                        reservation_id = %reservation.id,
                        expected = %from,
                        %actual,
                        "Reservation changed concurrently, re-checking"
                    );
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
            patch.apply(&mut reservation);

            info!(
                reservation_id = %reservation.id,
                %from,
                %to,
                "Reservation status changed"
            );

            return Ok(reservation);
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
