//! # DriveEasy booking engine
//!
//! Reservation & pricing core for the DriveEasy car rental service.
//!
//! ## Architecture
//!
//! - **domain**: rental periods, pricing, vehicles, principals, the
//!   reservation aggregate and its status machine, store interfaces
//! - **application**: booking and lifecycle services
//! - **infrastructure**: in-memory and SeaORM (SQLite) stores
//! - **config**: TOML configuration and tracing setup
//!
//! ```ignore
//! let store = Arc::new(InMemoryReservationStore::new());
//! let booking = BookingService::new(store.clone(), catalog);
//! let reservation = booking.book(Some(&principal), "car1", &request).await?;
//!
//! let lifecycle = ReservationLifecycle::new(store);
//! lifecycle.cancel(&reservation.id, Some(&principal)).await?;
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, init_tracing, AppConfig};

pub use application::{BookingRequest, BookingService, BookingView, ReservationLifecycle};
pub use infrastructure::{
    init_and_migrate, init_database, DatabaseConfig, InMemoryCatalog, InMemoryReservationStore,
    SeaOrmCatalog, SeaOrmReservationStore,
};
pub use shared::errors::{BookingError, ConfigError, LifecycleError, StoreError, ValidationError};
