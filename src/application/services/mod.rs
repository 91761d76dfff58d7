//! Application services

mod booking;
mod lifecycle;

pub use booking::{local_clock, BookingRequest, BookingService, BookingView, Clock};
pub use lifecycle::ReservationLifecycle;
