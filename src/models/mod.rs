//! Domain models for the homestay booking service.
//!
//! Booking rules (date ranges, blackout dates, guest counts, pricing) live in
//! `homestay_core`; this module holds what the service persists and returns.
//!
//! - [`Reservation`]: a confirmed, stored booking with the guest's contact details.
//! - [`AvailabilityResponse`]: free dates in a requested window.
//! - [`Picture`]: an image for the landing page gallery.

mod availability;
mod picture;
mod reservation;

pub use availability::*;
pub use picture::*;
pub use reservation::*;
