//! Application layer: booking use-cases on top of the domain

pub mod services;

pub use services::{BookingRequest, BookingService, BookingView, ReservationLifecycle};
