//! Entry and summary view state.
//!
//! The entry view owns the in-progress selection and mutates it only through
//! the methods below. Confirming produces a [`ReservationSelection`] that is
//! moved into the summary view; the summary never reads entry-view state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::booking::{validate_range, BlackoutSet, DateRange, ValidationError};
use crate::guests::{adjust_guests, GuestCount, GuestStep};
use crate::pricing::compute_total_cost;

/// Shown when the summary view is reached without a confirmed selection.
pub const INVALID_DETAILS_MESSAGE: &str =
    "Invalid reservation details. Please go back and try again.";

/// Dates and guests as currently chosen, before validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionCandidate {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub guests: GuestCount,
}

/// A confirmed selection, handed to the summary view by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReservationSelection {
    #[serde(flatten)]
    date_range: DateRange,
    guests: GuestCount,
}

impl ReservationSelection {
    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub fn guests(&self) -> GuestCount {
        self.guests
    }
}

/// Validate a candidate and turn it into a selection for the summary view.
pub fn confirm_reservation(
    candidate: SelectionCandidate,
) -> Result<ReservationSelection, ValidationError> {
    let date_range = validate_range(candidate.start_date, candidate.end_date)?;
    Ok(ReservationSelection {
        date_range,
        guests: candidate.guests,
    })
}

/// Which field the open date picker is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickerTarget {
    CheckIn,
    CheckOut,
}

/// Result of pressing "Reserve" in the entry view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Summary(ReservationSelection),
}

/// State of the landing page's reservation bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub guests: GuestCount,
    pub date_picker: Option<PickerTarget>,
    pub guest_picker_open: bool,
}

impl EntryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_date_picker(&mut self, target: PickerTarget) {
        self.date_picker = Some(target);
    }

    pub fn open_guest_picker(&mut self) {
        self.guest_picker_open = true;
    }

    /// Clicking the overlay closes whichever picker is open.
    pub fn close_overlays(&mut self) {
        self.date_picker = None;
        self.guest_picker_open = false;
    }

    /// Apply a date chosen in the open picker, then close it.
    ///
    /// A blacked-out date is refused and the picker stays open. `None`
    /// clears the field. Returns whether the pick was applied.
    pub fn pick_date(&mut self, date: Option<NaiveDate>, blackout: &BlackoutSet) -> bool {
        let Some(target) = self.date_picker else {
            return false;
        };
        if date.is_some_and(|d| blackout.contains(d)) {
            return false;
        }

        match target {
            PickerTarget::CheckIn => self.start_date = date,
            PickerTarget::CheckOut => self.end_date = date,
        }
        self.date_picker = None;
        true
    }

    pub fn increment_guests(&mut self) {
        self.guests = adjust_guests(self.guests, GuestStep::Increment);
    }

    pub fn decrement_guests(&mut self) {
        self.guests = adjust_guests(self.guests, GuestStep::Decrement);
    }

    /// Running total shown while dates are being picked; 0 until both are set.
    pub fn estimated_cost(&self, nightly_rate: u64) -> u64 {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => compute_total_cost(start, end, nightly_rate),
            _ => 0,
        }
    }

    pub fn candidate(&self) -> SelectionCandidate {
        SelectionCandidate {
            start_date: self.start_date,
            end_date: self.end_date,
            guests: self.guests,
        }
    }

    /// Press "Reserve". On error the view stays where it is.
    pub fn reserve(&self) -> Result<Navigation, ValidationError> {
        confirm_reservation(self.candidate()).map(Navigation::Summary)
    }
}

/// The reservation summary ("Payment") page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryView {
    Details {
        start_date: NaiveDate,
        end_date: NaiveDate,
        guests: GuestCount,
        nights: i64,
        nightly_rate: u64,
        total_cost: u64,
    },
    Invalid {
        message: String,
    },
}

impl SummaryView {
    /// Build the summary from whatever the navigation handed over.
    ///
    /// The price is always recomputed from the dates.
    pub fn from_handoff(selection: Option<ReservationSelection>, nightly_rate: u64) -> Self {
        let Some(selection) = selection else {
            return Self::Invalid {
                message: INVALID_DETAILS_MESSAGE.to_string(),
            };
        };

        let range = selection.date_range();
        Self::Details {
            start_date: range.start(),
            end_date: range.end(),
            guests: selection.guests(),
            nights: range.nights(),
            nightly_rate,
            total_cost: range.total_cost(nightly_rate),
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }
}
