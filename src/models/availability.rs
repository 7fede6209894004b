use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Dates in `from..=to` that are neither blacked out nor booked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub available_dates: Vec<NaiveDate>,
}
