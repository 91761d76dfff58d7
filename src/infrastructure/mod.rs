//! Infrastructure layer - external concerns

pub mod database;
pub mod storage;

pub use database::{
    init_and_migrate, init_database, DatabaseConfig, SeaOrmCatalog, SeaOrmReservationStore,
};
pub use storage::{InMemoryCatalog, InMemoryReservationStore};
