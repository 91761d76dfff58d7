//! Vehicle catalog boundary
//!
//! The catalog is owned elsewhere; the engine only resolves vehicles by id.

pub mod catalog;
pub mod model;

pub use catalog::CatalogProvider;
pub use model::Vehicle;
