//! Optional paid services charged per rental day

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Add-on service key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddOn {
    Insurance,
    ExtraDriver,
    ChildSeat,
    Gps,
}

impl AddOn {
    pub const ALL: [AddOn; 4] = [
        AddOn::Insurance,
        AddOn::ExtraDriver,
        AddOn::ChildSeat,
        AddOn::Gps,
    ];

    /// Surcharge per rental day, in the same unit as the daily rate
    pub fn daily_surcharge(&self) -> Decimal {
        match self {
            Self::Insurance => Decimal::from(15),
            Self::ExtraDriver => Decimal::from(10),
            Self::ChildSeat => Decimal::from(5),
            Self::Gps => Decimal::from(7),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insurance => "insurance",
            Self::ExtraDriver => "extraDriver",
            Self::ChildSeat => "childSeat",
            Self::Gps => "gps",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "insurance" => Some(Self::Insurance),
            "extraDriver" | "extra-driver" => Some(Self::ExtraDriver),
            "childSeat" | "child-seat" => Some(Self::ChildSeat),
            "gps" => Some(Self::Gps),
            _ => None,
        }
    }
}

impl std::fmt::Display for AddOn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which add-ons a customer picked. All-false means no add-ons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddOnSelection {
    pub insurance: bool,
    pub extra_driver: bool,
    pub child_seat: bool,
    pub gps: bool,
}

impl AddOnSelection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, add_on: AddOn) -> Self {
        self.set(add_on, true);
        self
    }

    pub fn set(&mut self, add_on: AddOn, enabled: bool) {
        match add_on {
            AddOn::Insurance => self.insurance = enabled,
            AddOn::ExtraDriver => self.extra_driver = enabled,
            AddOn::ChildSeat => self.child_seat = enabled,
            AddOn::Gps => self.gps = enabled,
        }
    }

    pub fn is_enabled(&self, add_on: AddOn) -> bool {
        match add_on {
            AddOn::Insurance => self.insurance,
            AddOn::ExtraDriver => self.extra_driver,
            AddOn::ChildSeat => self.child_seat,
            AddOn::Gps => self.gps,
        }
    }

    /// Enabled add-ons in declaration order
    pub fn enabled(&self) -> impl Iterator<Item = AddOn> + '_ {
        AddOn::ALL.into_iter().filter(|a| self.is_enabled(*a))
    }

    pub fn count(&self) -> usize {
        self.enabled().count()
    }
}

impl FromIterator<AddOn> for AddOnSelection {
    fn from_iter<T: IntoIterator<Item = AddOn>>(iter: T) -> Self {
        iter.into_iter()
            .fold(AddOnSelection::none(), |sel, add_on| sel.with(add_on))
    }
}
