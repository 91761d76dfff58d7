//! Rental period types and the temporal checks applied before booking

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::shared::errors::ValidationError;

/// Dates as picked by the customer; either may still be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeInput {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRangeInput {
    pub fn new(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn between(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self::new(Some(start_date), Some(end_date))
    }
}

/// A rental period with both dates present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Absolute number of calendar days between the two dates
    pub fn days_between(&self) -> i64 {
        (self.end_date - self.start_date).num_days().abs()
    }
}

impl From<DateRange> for DateRangeInput {
    fn from(range: DateRange) -> Self {
        Self::between(range.start_date, range.end_date)
    }
}

/// Temporal checks on a candidate rental period.
///
/// Only the start boundary is gated against the past. There is no maximum
/// duration or blackout calendar.
///
/// "Today" is the calendar day of `now` in its own time zone, so callers pass
/// the customer's local time rather than UTC.
pub struct DateRangeValidator;

impl DateRangeValidator {
    pub fn validate<Tz: TimeZone>(
        input: &DateRangeInput,
        now: DateTime<Tz>,
    ) -> Result<DateRange, ValidationError> {
        let (Some(start), Some(end)) = (input.start_date, input.end_date) else {
            return Err(ValidationError::MissingDates);
        };

        let today = now.date_naive();
        if start < today {
            return Err(ValidationError::PastDate { start, today });
        }

        if end < start {
            return Err(ValidationError::EndBeforeStart { start, end });
        }

        Ok(DateRange::new(start, end))
    }
}

// ── Tests ──────────────────────────────────────────────────────
