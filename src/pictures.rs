//! HTTP client for the landing page picture gallery.
//!
//! Talks to an Unsplash-compatible `/photos/random` endpoint. The gallery is
//! decoration: every failure is logged and turned into an empty list.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::config::PictureSettings;
use crate::models::Picture;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_ALT: &str = "Random image from Unsplash";

/// Picture fetch errors.
#[derive(Debug, Error)]
pub enum PictureError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Picture service returned {0}")]
    Status(StatusCode),

    #[error("No access key configured")]
    NotConfigured,
}

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    id: String,
    urls: UnsplashUrls,
    alt_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    small: String,
}

impl From<UnsplashPhoto> for Picture {
    fn from(photo: UnsplashPhoto) -> Self {
        Self {
            id: photo.id,
            url: photo.urls.small,
            alt: photo
                .alt_description
                .filter(|alt| !alt.is_empty())
                .unwrap_or_else(|| DEFAULT_ALT.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PictureClient {
    base_url: String,
    access_key: Option<String>,
    count: u32,
    client: Client,
}

impl PictureClient {
    pub fn new(settings: &PictureSettings) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            access_key: settings.access_key.clone(),
            count: settings.count,
            client,
        }
    }

    /// A client that never makes a request.
    pub fn disabled() -> Self {
        Self::new(&PictureSettings::default())
    }

    /// Fetch gallery pictures. Returns an empty list on any failure.
    pub async fn fetch_pictures(&self) -> Vec<Picture> {
        match self.try_fetch().await {
            Ok(pictures) => pictures,
            Err(PictureError::NotConfigured) => {
                tracing::debug!("Picture gallery disabled, no access key");
                Vec::new()
            }
            Err(e) => {
                tracing::error!("Error fetching pictures: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self) -> Result<Vec<Picture>, PictureError> {
        let key = self
            .access_key
            .as_deref()
            .ok_or(PictureError::NotConfigured)?;

        let response = self
            .client
            .get(format!("{}/photos/random", self.base_url))
            .query(&[("count", self.count.to_string()), ("client_id", key.to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PictureError::Status(status));
        }

        let photos: Vec<UnsplashPhoto> = response.json().await?;
        Ok(photos.into_iter().map(Picture::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_without_alt_gets_default() {
        let photo: UnsplashPhoto = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "urls": { "small": "https://images.example/abc.jpg", "full": "ignored" },
            "alt_description": null
        }))
        .unwrap();

        let picture = Picture::from(photo);
        assert_eq!(picture.id, "abc");
        assert_eq!(picture.url, "https://images.example/abc.jpg");
        assert_eq!(picture.alt, DEFAULT_ALT);
    }

    #[tokio::test]
    async fn disabled_client_returns_nothing() {
        assert!(PictureClient::disabled().fetch_pictures().await.is_empty());
    }
}
