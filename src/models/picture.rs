use serde::{Deserialize, Serialize};

/// An image shown in the landing page gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    pub id: String,
    pub url: String,
    pub alt: String,
}
