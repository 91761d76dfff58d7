//! Duration and price calculation

use rust_decimal::Decimal;
use serde::Serialize;

use super::add_on::{AddOn, AddOnSelection};
use crate::domain::booking::DateRange;

/// What a price line charges for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "addOn")]
pub enum PriceComponent {
    Rental,
    AddOn(AddOn),
}

/// One charged component of a quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceLine {
    pub component: PriceComponent,
    pub daily_amount: Decimal,
    pub days: u32,
    pub amount: Decimal,
}

/// Duration and price derived from a rental period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub duration_days: u32,
    pub daily_rate: Decimal,
    pub total_price: Decimal,
    /// Rental line first, then one line per enabled add-on
    pub lines: Vec<PriceLine>,
}

/// Number of billable days in a rental period.
///
/// A partial day counts as a full day and a same-day rental is one day.
pub fn rental_days(range: &DateRange) -> u32 {
    let days = u32::try_from(range.days_between()).unwrap_or(u32::MAX);
    days.max(1)
}

pub struct RateCalculator;

impl RateCalculator {
    /// Price a rental period.
    ///
    /// `daily_rate` is expected to be non-negative; the calculation itself
    /// cannot fail.
    pub fn compute(range: &DateRange, daily_rate: Decimal, add_ons: &AddOnSelection) -> Quote {
        let days = rental_days(range);
        let day_count = Decimal::from(days);

        let mut lines = Vec::with_capacity(1 + add_ons.count());
        lines.push(PriceLine {
            component: PriceComponent::Rental,
            daily_amount: daily_rate,
            days,
            amount: daily_rate * day_count,
        });
        lines.extend(add_ons.enabled().map(|add_on| {
            let daily_amount = add_on.daily_surcharge();
            PriceLine {
                component: PriceComponent::AddOn(add_on),
                daily_amount,
                days,
                amount: daily_amount * day_count,
            }
        }));

        let total_price = lines.iter().map(|line| line.amount).sum();

        Quote {
            duration_days: days,
            daily_rate,
            total_price,
            lines,
        }
    }
}

/// Format an amount for display, e.g. `5466.00 INR`
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    format!("{:.2} {}", amount.round_dp(2), currency)
}

// ── Tests ──────────────────────────────────────────────────────
