//! Reservation domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::status::ReservationStatus;
use crate::domain::booking::DateRange;
use crate::domain::pricing::{AddOnSelection, RateCalculator};
use crate::shared::errors::LifecycleError;

/// Booking ready to be persisted: everything except the store-assigned
/// `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub principal_id: String,
    pub principal_contact: String,
    pub range: DateRange,
    pub duration_days: u32,
    pub daily_rate: Decimal,
    pub add_ons: AddOnSelection,
    pub total_price: Decimal,
    pub pickup_location: Option<String>,
    pub status: ReservationStatus,
}

/// Persisted vehicle reservation.
///
/// Vehicle name and rate are snapshots taken at booking time; later
/// catalog changes never reach a placed reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub principal_id: String,
    pub principal_contact: String,
    pub range: DateRange,
    pub duration_days: u32,
    pub daily_rate: Decimal,
    pub add_ons: AddOnSelection,
    pub total_price: Decimal,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<String>,
}

impl Reservation {
    /// Materialize a new booking with the identity assigned by a store
    pub fn from_new(new: NewReservation, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            vehicle_id: new.vehicle_id,
            vehicle_name: new.vehicle_name,
            principal_id: new.principal_id,
            principal_contact: new.principal_contact,
            range: new.range,
            duration_days: new.duration_days,
            daily_rate: new.daily_rate,
            add_ons: new.add_ons,
            total_price: new.total_price,
            status: new.status,
            created_at,
            pickup_location: new.pickup_location,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Check that moving to `to` is legal from the current status
    pub fn check_transition(&self, to: ReservationStatus) -> Result<(), LifecycleError> {
        if self.status.is_terminal() {
            return Err(LifecycleError::AlreadyTerminal {
                id: self.id.clone(),
                status: self.status,
            });
        }
        if !self.status.allows(to) {
            return Err(LifecycleError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        Ok(())
    }

    /// Recompute duration and price from the stored period, rate and
    /// add-ons and compare with the stored snapshot
    pub fn pricing_is_consistent(&self) -> bool {
        let quote = RateCalculator::compute(&self.range, self.daily_rate, &self.add_ons);
        quote.duration_days == self.duration_days && quote.total_price == self.total_price
    }
}

/// Partial update applied by the store. `None` fields are left untouched.
///
/// With `expected_status` set the store applies the patch only if the record
/// is still in that status, and reports `StoreError::StatusConflict`
/// otherwise. The check and the write happen atomically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationPatch {
    pub status: Option<ReservationStatus>,
    pub expected_status: Option<ReservationStatus>,
}

impl ReservationPatch {
    /// Unconditional status change
    pub fn status(status: ReservationStatus) -> Self {
        Self {
            status: Some(status),
            expected_status: None,
        }
    }

    /// Status change guarded by the status the caller last observed
    pub fn transition(from: ReservationStatus, to: ReservationStatus) -> Self {
        Self {
            status: Some(to),
            expected_status: Some(from),
        }
    }

    /// Whether a record in `current` status may receive this patch
    pub fn applies_to(&self, current: ReservationStatus) -> bool {
        self.expected_status.is_none_or(|expected| expected == current)
    }

    pub fn apply(&self, reservation: &mut Reservation) {
        if let Some(status) = self.status {
            reservation.status = status;
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::pricing::AddOn;
    use chrono::NaiveDate;

    pub(crate) fn sample_new() -> NewReservation {
        let start = NaiveDate::from_ymd_opt(2030, 1, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2030, 1, 13).unwrap();
        NewReservation {
            vehicle_id: "car1".into(),
            vehicle_name: "Swift Dzire".into(),
            principal_id: "user-a".into(),
            principal_contact: "a@example.com".into(),
            range: DateRange::new(start, end),
            duration_days: 3,
            daily_rate: Decimal::from(1800),
            add_ons: AddOnSelection::none().with(AddOn::Insurance).with(AddOn::Gps),
            total_price: Decimal::from(5466),
            pickup_location: None,
            status: ReservationStatus::Pending,
        }
    }

    fn sample(status: ReservationStatus) -> Reservation {
        let mut r = Reservation::from_new(sample_new(), "res-1".into(), Utc::now());
        r.status = status;
        r
    }

    #[test]
    fn pricing_consistent_for_sample() {
        assert!(sample(ReservationStatus::Pending).pricing_is_consistent());
    }

    #[test]
    fn tampered_price_is_inconsistent() {
        let mut r = sample(ReservationStatus::Pending);
        r.total_price = Decimal::from(5400);
        assert!(!r.pricing_is_consistent());
    }

    #[test]
    fn transition_from_terminal() {
        let r = sample(ReservationStatus::Cancelled);
        let err = r.check_transition(ReservationStatus::Completed).unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::AlreadyTerminal {
                status: ReservationStatus::Cancelled,
                ..
            }
        ));
    }

    #[test]
    fn confirm_twice_is_invalid() {
        let r = sample(ReservationStatus::Confirmed);
        let err = r.check_transition(ReservationStatus::Confirmed).unwrap_err();
        assert!(matches!(err, LifecycleError::InvalidTransition { .. }));
    }

    #[test]
    fn patch_only_touches_status() {
        let mut r = sample(ReservationStatus::Pending);
        let before = r.clone();
        ReservationPatch::status(ReservationStatus::Cancelled).apply(&mut r);
        assert_eq!(r.status, ReservationStatus::Cancelled);
        r.status = before.status;
        assert_eq!(r, before);

        ReservationPatch::default().apply(&mut r);
        assert_eq!(r, before);
    }

    #[test]
    fn transition_patch_expects_prior_status() {
        let patch = ReservationPatch::transition(ReservationStatus::Pending, ReservationStatus::Confirmed);
        assert!(patch.applies_to(ReservationStatus::Pending));
        assert!(!patch.applies_to(ReservationStatus::Completed));
        assert!(ReservationPatch::status(ReservationStatus::Cancelled).applies_to(ReservationStatus::Completed));
    }

    #[test]
    fn serializes_to_record_shape() {
        let r = sample(ReservationStatus::Pending);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["vehicleName"], "Swift Dzire");
        assert_eq!(json["range"]["startDate"], "2030-01-10");
        assert_eq!(json["durationDays"], 3);
        assert_eq!(json["addOns"]["insurance"], true);
        assert_eq!(json["status"], "pending");
        assert!(json.get("pickupLocation").is_none());
    }
}
