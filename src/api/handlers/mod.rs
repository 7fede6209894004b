use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use homestay_core::{confirm_reservation, GuestCount, SelectionCandidate, SummaryView};
use serde::Deserialize;
use uuid::Uuid;

use crate::config::BookingPolicy;
use crate::db::Database;
use crate::models::*;
use crate::pictures::PictureClient;

/// Longest window `/availability` will enumerate.
const MAX_AVAILABILITY_DAYS: i64 = 366;

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

/// A user-correctable input problem; the message is safe to show.
fn bad_request(e: impl std::fmt::Display) -> (StatusCode, String) {
    let msg = e.to_string();
    tracing::warn!("Validation error: {}", msg);
    (StatusCode::BAD_REQUEST, msg)
}

/// A body that failed to bind is a client error, not 422.
fn rejected_body(rejection: JsonRejection) -> (StatusCode, String) {
    bad_request(rejection.body_text())
}

/// Unavailable dates become 409, anything else is internal.
fn booking_error(e: anyhow::Error) -> (StatusCode, String) {
    match e.downcast_ref::<DatesUnavailable>() {
        Some(unavailable) => {
            tracing::warn!("Booking refused: {}", unavailable);
            (StatusCode::CONFLICT, unavailable.to_string())
        }
        None => internal_error(e),
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Entry and summary views
// ============================================================

pub async fn list_blackout_dates(State(policy): State<Arc<BookingPolicy>>) -> Json<Vec<NaiveDate>> {
    Json(policy.blackout.iter().collect())
}

/// Query parameters for the availability window.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

pub async fn get_availability(
    State(db): State<Database>,
    State(policy): State<Arc<BookingPolicy>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, (StatusCode, String)> {
    let span = (query.to - query.from).num_days();
    if span < 0 {
        return Err(bad_request("`to` must not be before `from`"));
    }
    if span > MAX_AVAILABILITY_DAYS {
        return Err(bad_request(format!(
            "Availability window is limited to {} days",
            MAX_AVAILABILITY_DAYS
        )));
    }

    let available_dates = db
        .find_available_dates(query.from, query.to, &policy)
        .map_err(internal_error)?;

    Ok(Json(AvailabilityResponse {
        from: query.from,
        to: query.to,
        available_dates,
    }))
}

/// Selection as sent by the entry view, before any checks.
///
/// Used as the `/selection` body and the `/summary` query string.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub guests: Option<i64>,
}

impl SelectionQuery {
    fn into_candidate(self) -> Result<SelectionCandidate, homestay_core::GuestCountError> {
        let guests = match self.guests {
            Some(n) => GuestCount::try_from(n)?,
            None => GuestCount::default(),
        };
        Ok(SelectionCandidate {
            start_date: self.start_date,
            end_date: self.end_date,
            guests,
        })
    }
}

/// The "Reserve" button: validate the selection and hand it to the summary.
pub async fn confirm_selection(
    State(policy): State<Arc<BookingPolicy>>,
    input: Result<Json<SelectionQuery>, JsonRejection>,
) -> Result<Json<SummaryView>, (StatusCode, String)> {
    let Json(input) = input.map_err(rejected_body)?;
    let candidate = input.into_candidate().map_err(bad_request)?;
    let selection = confirm_reservation(candidate).map_err(bad_request)?;

    Ok(Json(SummaryView::from_handoff(
        Some(selection),
        policy.nightly_rate,
    )))
}

/// The summary page. Anything short of a valid selection renders the invalid state.
pub async fn get_summary(
    State(policy): State<Arc<BookingPolicy>>,
    query: Result<Query<SelectionQuery>, QueryRejection>,
) -> Json<SummaryView> {
    let selection = query
        .ok()
        .and_then(|Query(q)| q.into_candidate().ok())
        .and_then(|candidate| confirm_reservation(candidate).ok());

    if selection.is_none() {
        tracing::debug!("Summary requested without a valid selection");
    }

    Json(SummaryView::from_handoff(selection, policy.nightly_rate))
}

// ============================================================
// Reservations
// ============================================================

pub async fn list_reservations(
    State(db): State<Database>,
) -> Result<Json<Vec<Reservation>>, (StatusCode, String)> {
    db.get_all_reservations().map(Json).map_err(internal_error)
}

pub async fn get_reservation(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<Reservation>, (StatusCode, String)> {
    db.get_reservation(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Reservation not found".to_string()))
}

pub async fn create_reservation(
    State(db): State<Database>,
    State(policy): State<Arc<BookingPolicy>>,
    input: Result<Json<CreateReservationInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Reservation>), (StatusCode, String)> {
    let Json(input) = input.map_err(rejected_body)?;
    let new = input.validate().map_err(bad_request)?;

    let reservation = db.create_reservation(new, &policy).map_err(booking_error)?;
    tracing::info!("Created {}", reservation);

    Ok((StatusCode::CREATED, Json(reservation)))
}

pub async fn delete_reservation(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if db.delete_reservation(id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Reservation not found".to_string()))
    }
}

// ============================================================
// Gallery
// ============================================================

pub async fn list_pictures(State(pictures): State<PictureClient>) -> Json<Vec<Picture>> {
    Json(pictures.fetch_pictures().await)
}
