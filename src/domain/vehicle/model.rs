//! Vehicle catalog entry

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Vehicle as exposed by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    /// Price per rental day, in the smallest currency unit
    pub daily_rate: Decimal,
    /// Centers where the vehicle can be picked up
    #[serde(default)]
    pub pickup_locations: BTreeSet<String>,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, name: impl Into<String>, daily_rate: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            daily_rate,
            pickup_locations: BTreeSet::new(),
        }
    }

    pub fn with_pickup_locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pickup_locations = locations.into_iter().map(Into::into).collect();
        self
    }

    pub fn serves(&self, location: &str) -> bool {
        self.pickup_locations.contains(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_only_listed_locations() {
        let v = Vehicle::new("car1", "Swift Dzire", Decimal::from(1800))
            .with_pickup_locations(["Mumbai", "Delhi"]);
        assert!(v.serves("Mumbai"));
        assert!(!v.serves("Chennai"));
    }

    #[test]
    fn no_locations_serves_nothing() {
        let v = Vehicle::new("car2", "Creta", Decimal::from(3200));
        assert!(!v.serves("Mumbai"));
    }
}
