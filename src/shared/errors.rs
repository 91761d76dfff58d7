use thiserror::Error;

use crate::domain::reservation::ReservationStatus;

/// Reasons a candidate date range is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Both a start date and an end date must be selected")]
    MissingDates,

    #[error("Start date {start} is before today ({today})")]
    PastDate {
        start: chrono::NaiveDate,
        today: chrono::NaiveDate,
    },

    #[error("End date {end} is before start date {start}")]
    EndBeforeStart {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}

/// Failures reported by a reservation store or catalog backend.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Write rejected: {0}")]
    Rejected(String),

    #[error("Not found: {entity} with id={id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Corrupt record {id}: {reason}")]
    Corrupt { id: String, reason: String },

    /// A conditional update found the record in a different status
    #[error("Reservation {id} is {actual}, expected {expected}")]
    StatusConflict {
        id: String,
        expected: ReservationStatus,
        actual: ReservationStatus,
    },
}

impl StoreError {
    /// Whether the failure is likely transient and a caller-driven retry
    /// may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Sign in to book a vehicle")]
    Unauthenticated,

    #[error("Invalid rental period: {0}")]
    InvalidRange(#[from] ValidationError),

    #[error("Vehicle {0} not found")]
    VehicleNotFound(String),

    #[error("Pickup location {location} is not served for vehicle {vehicle_id}")]
    InvalidLocation { vehicle_id: String, location: String },

    #[error("Vehicle {vehicle_id} has a negative daily rate")]
    InvalidRate { vehicle_id: String },

    #[error("Could not save the booking: {0}")]
    PersistenceFailure(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Sign in to manage bookings")]
    Unauthenticated,

    #[error("Reservation {0} does not belong to the requester")]
    Forbidden(String),

    #[error("Reservation {id} is already {status}")]
    AlreadyTerminal { id: String, status: ReservationStatus },

    #[error("Cannot move reservation from {from} to {to}")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    #[error("Reservation {0} not found")]
    NotFound(String),

    #[error("Could not update the booking: {0}")]
    PersistenceFailure(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}
