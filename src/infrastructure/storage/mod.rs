//! In-memory storage implementations

mod memory;

pub use memory::{InMemoryCatalog, InMemoryReservationStore};
