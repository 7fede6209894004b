//! Booking rules for the Ecopark homestay.
//!
//! # Core Concepts
//!
//! - [`DateRange`]: a check-in/check-out pair where check-out is strictly after check-in.
//!   Only [`validate_range`] produces one.
//! - [`BlackoutSet`]: calendar days that cannot be picked as check-in or check-out.
//! - [`GuestCount`]: number of guests, clamped to `1..=4` by [`adjust_guests`].
//! - [`ReservationSelection`]: the confirmed dates and guests handed from the
//!   entry view to the summary view by value.
//!
//! Pricing is a flat [`NIGHTLY_RATE`] per night; see [`compute_total_cost`].

mod booking;
mod guests;
mod pricing;
mod view;

pub use booking::*;
pub use guests::*;
pub use pricing::*;
pub use view::*;
