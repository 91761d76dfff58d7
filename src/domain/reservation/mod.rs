//! Reservation aggregate
//!
//! Contains the Reservation entity, its status machine, and the store interface.

pub mod model;
pub mod repository;
pub mod status;

pub use model::{NewReservation, Reservation, ReservationPatch};
pub use repository::{ReservationQuery, ReservationStore, SortDirection};
pub use status::ReservationStatus;
