use chrono::{DateTime, NaiveDate, Utc};
use homestay_core::{
    validate_range, DateRange, GuestCount, GuestCountError, ValidationError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A confirmed stay, stored with the guest's contact details.
///
/// `total_cost` is fixed at booking time from the nightly rate then in effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub num_guests: GuestCount,
    pub total_cost: u64,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Display for Reservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Reservation(email: {}, first_name: {}, last_name: {})",
            self.email, self.first_name, self.last_name
        )
    }
}

/// Request body for booking a stay.
///
/// Dates and guest count arrive unchecked; see [`CreateReservationInput::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_num_guests")]
    pub num_guests: i64,
}

fn default_num_guests() -> i64 {
    i64::from(GuestCount::default().get())
}

/// Contact details of the person making a reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestDetails {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
}

/// A validated booking request, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub guest: GuestDetails,
    pub date_range: DateRange,
    pub num_guests: GuestCount,
}

/// Why a booking request was rejected before reaching the database.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReservationInputError {
    #[error(transparent)]
    Dates(#[from] ValidationError),

    #[error(transparent)]
    Guests(#[from] GuestCountError),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

impl CreateReservationInput {
    pub fn validate(self) -> Result<NewReservation, ReservationInputError> {
        let date_range = validate_range(self.start_date, self.end_date)?;
        let num_guests = GuestCount::try_from(self.num_guests)?;

        let email = required("email", self.email)?;
        if !is_plausible_email(&email) {
            return Err(ReservationInputError::InvalidEmail(email));
        }

        Ok(NewReservation {
            guest: GuestDetails {
                email,
                first_name: required("first_name", self.first_name)?,
                last_name: required("last_name", self.last_name)?,
                national_id: required("national_id", self.national_id)?,
            },
            date_range,
            num_guests,
        })
    }
}

fn required(field: &'static str, value: String) -> Result<String, ReservationInputError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ReservationInputError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    }
}

/// The requested stay clashes with a blackout date or another reservation.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Dates not available between {start} and {end}")]
pub struct DatesUnavailable {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl From<&DateRange> for DatesUnavailable {
    fn from(range: &DateRange) -> Self {
        Self {
            start: range.start(),
            end: range.end(),
        }
    }
}
