//! Database repository implementations

pub mod reservation_repository;
pub mod vehicle_repository;

pub use reservation_repository::SeaOrmReservationStore;
pub use vehicle_repository::SeaOrmCatalog;

use sea_orm::DbErr;

use crate::shared::errors::StoreError;

pub(crate) fn db_err(e: DbErr) -> StoreError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            StoreError::Unavailable(format!("Database error: {}", e))
        }
        other => StoreError::Rejected(format!("Database error: {}", other)),
    }
}
