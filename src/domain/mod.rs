pub mod booking;
pub mod pricing;
pub mod principal;
pub mod reservation;
pub mod vehicle;

// Re-export commonly used types
pub use booking::{DateRange, DateRangeInput, DateRangeValidator};
pub use pricing::{AddOn, AddOnSelection, Quote, RateCalculator};
pub use principal::{IdentityProvider, Principal, StaticIdentity};
pub use reservation::{
    NewReservation, Reservation, ReservationPatch, ReservationQuery, ReservationStatus,
    ReservationStore, SortDirection,
};
pub use vehicle::{CatalogProvider, Vehicle};

pub use crate::shared::errors::{BookingError, LifecycleError, StoreError, ValidationError};
