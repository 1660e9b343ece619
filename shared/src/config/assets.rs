//! Asset URL configuration
//!
//! Image and document paths are stored relative; full URLs are composed
//! only at the read boundary using these base URLs.

use serde::{Deserialize, Serialize};

/// Base URLs for stored asset paths
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AssetConfig {
    /// Base URL for profile images
    pub profile_base_url: String,

    /// Base URL for uploaded documents
    pub document_base_url: String,
}

impl AssetConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            profile_base_url: std::env::var("PROFILE_BASE_URL").unwrap_or_default(),
            document_base_url: std::env::var("DOCUMENT_BASE_URL").unwrap_or_default(),
        }
    }
}
