//! Database entities module

pub mod reservation;
pub mod vehicle;

pub use reservation::Entity as Reservation;
pub use vehicle::Entity as Vehicle;
