//! Runtime settings loaded from environment variables.
//!
//! - `HOMESTAY_PORT` - HTTP port (default: 3000)
//! - `HOMESTAY_DB` - SQLite database path (default: platform data directory)
//! - `HOMESTAY_NIGHTLY_RATE` - price per night in VND (default: 500000)
//! - `HOMESTAY_BLACKOUT_DATES` - comma-separated `YYYY-MM-DD` list (default: 2024-11-28..30)
//! - `HOMESTAY_CORS_ORIGINS` - comma-separated allowed origins (default: permissive)
//! - `HOMESTAY_UNSPLASH_ACCESS_KEY` - enables the picture gallery when set
//! - `HOMESTAY_UNSPLASH_URL` - picture API base URL
//! - `HOMESTAY_PICTURE_COUNT` - number of pictures to request (default: 9)

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use homestay_core::{BlackoutSet, NIGHTLY_RATE};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UNSPLASH_URL: &str = "https://api.unsplash.com";
const DEFAULT_PICTURE_COUNT: u32 = 9;

/// Pricing and availability rules shared by every view and endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPolicy {
    pub nightly_rate: u64,
    pub blackout: BlackoutSet,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            nightly_rate: NIGHTLY_RATE,
            blackout: BlackoutSet::homestay_default(),
        }
    }
}

/// Picture gallery settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureSettings {
    /// Unsplash access key. No key means no remote fetch.
    pub access_key: Option<String>,
    pub base_url: String,
    pub count: u32,
}

impl Default for PictureSettings {
    fn default() -> Self {
        Self {
            access_key: None,
            base_url: DEFAULT_UNSPLASH_URL.to_string(),
            count: DEFAULT_PICTURE_COUNT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub database_path: Option<PathBuf>,
    pub policy: BookingPolicy,
    pub cors_origins: Option<Vec<String>>,
    pub pictures: PictureSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_path: None,
            policy: BookingPolicy::default(),
            cors_origins: None,
            pictures: PictureSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("HOMESTAY_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let database_path = lookup("HOMESTAY_DB").map(PathBuf::from);

        let nightly_rate = lookup("HOMESTAY_NIGHTLY_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.policy.nightly_rate);

        let blackout = match lookup("HOMESTAY_BLACKOUT_DATES") {
            Some(list) => parse_blackout_dates(&list),
            None => defaults.policy.blackout,
        };

        let cors_origins = lookup("HOMESTAY_CORS_ORIGINS")
            .map(|s| s.split(',').map(|s| s.trim().to_string()).collect());

        let pictures = PictureSettings {
            access_key: lookup("HOMESTAY_UNSPLASH_ACCESS_KEY").filter(|k| !k.is_empty()),
            base_url: lookup("HOMESTAY_UNSPLASH_URL").unwrap_or(defaults.pictures.base_url),
            count: lookup("HOMESTAY_PICTURE_COUNT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.pictures.count),
        };

        Self {
            port,
            database_path,
            policy: BookingPolicy {
                nightly_rate,
                blackout,
            },
            cors_origins,
            pictures,
        }
    }

    /// Configured database path, or `homestay.db` in the platform data directory.
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }
        let dirs = directories::ProjectDirs::from("", "", "homestay")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("homestay.db"))
    }
}

/// Parse a comma-separated list of ISO dates, skipping invalid entries.
fn parse_blackout_dates(list: &str) -> BlackoutSet {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<NaiveDate>() {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::warn!("Ignoring invalid blackout date {:?}: {}", s, e);
                None
            }
        })
        .collect()
}
