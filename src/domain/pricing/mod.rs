//! Rental pricing
//!
//! Duration and price are derived from the rental period, the vehicle's
//! daily rate and the selected add-on services. Everything here is pure.

pub mod add_on;
pub mod calculator;

pub use add_on::{AddOn, AddOnSelection};
pub use calculator::{format_amount, rental_days, PriceComponent, PriceLine, Quote, RateCalculator};
