use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_GUESTS: u8 = 1;
pub const MAX_GUESTS: u8 = 4;

/// A raw guest count outside `MIN_GUESTS..=MAX_GUESTS`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Number of guests must be between 1 and 4, got {0}")]
pub struct GuestCountError(pub i64);

/// Number of guests in a stay, always within `MIN_GUESTS..=MAX_GUESTS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct GuestCount(u8);

impl GuestCount {
    pub const MIN: Self = Self(MIN_GUESTS);
    pub const MAX: Self = Self(MAX_GUESTS);

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for GuestCount {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<i64> for GuestCount {
    type Error = GuestCountError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(MIN_GUESTS)..=i64::from(MAX_GUESTS)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(GuestCountError(value))
        }
    }
}

impl From<GuestCount> for u8 {
    fn from(count: GuestCount) -> Self {
        count.0
    }
}

impl std::fmt::Display for GuestCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            1 => write!(f, "1 guest"),
            n => write!(f, "{} guests", n),
        }
    }
}

/// One press of the guest picker's `+` or `-` button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestStep {
    Increment,
    Decrement,
}

/// Apply one step to the guest count. Stepping past a bound is a no-op.
pub fn adjust_guests(current: GuestCount, step: GuestStep) -> GuestCount {
    match step {
        GuestStep::Increment if current.0 < MAX_GUESTS => GuestCount(current.0 + 1),
        GuestStep::Decrement if current.0 > MIN_GUESTS => GuestCount(current.0 - 1),
        _ => current,
    }
}
