use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a date selection cannot be confirmed.
///
/// Both are user-correctable; the `Display` text is the prompt shown to the guest.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select both start and end dates.")]
    MissingDate,

    #[error("End date must be after the start date.")]
    InvalidOrder,
}

/// A stay from check-in (`start`) to check-out (`end`).
///
/// `end` is always strictly after `start`. The range covers the nights
/// `start..end`; the guest leaves on `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    #[serde(rename = "start_date")]
    start: NaiveDate,
    #[serde(rename = "end_date")]
    end: NaiveDate,
}

impl DateRange {
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of nights in the stay. Always at least 1.
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Whether `date` is one of the nights of the stay.
    pub fn includes_night(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Whether two stays share at least one night.
    ///
    /// A check-out on the same day as another stay's check-in does not overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Validate a check-in/check-out pair as chosen in the entry view.
///
/// Blackout dates are not checked here; the date picker refuses them.
pub fn validate_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<DateRange, ValidationError> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err(ValidationError::MissingDate);
    };

    if end <= start {
        return Err(ValidationError::InvalidOrder);
    }

    Ok(DateRange { start, end })
}

/// Calendar days that cannot be chosen as check-in or check-out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlackoutSet {
    dates: BTreeSet<NaiveDate>,
}

impl BlackoutSet {
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// The property's fixed unavailable days: 28-30 November 2024.
    pub fn homestay_default() -> Self {
        Self::new(
            [28, 29, 30]
                .into_iter()
                .filter_map(|day| NaiveDate::from_ymd_opt(2024, 11, day)),
        )
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Whether any day from check-in through check-out, inclusive, is blacked out.
    pub fn touches(&self, range: &DateRange) -> bool {
        self.dates.range(range.start..=range.end).next().is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl FromIterator<NaiveDate> for BlackoutSet {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self::new(iter)
    }
}

pub fn is_blacked_out(date: NaiveDate, blackout: &BlackoutSet) -> bool {
    blackout.contains(date)
}
