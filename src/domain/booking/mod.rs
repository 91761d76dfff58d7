//! Rental period selection and validation

pub mod date_range;

pub use date_range::{DateRange, DateRangeInput, DateRangeValidator};
