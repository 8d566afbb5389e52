//! Google Maps configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Google Maps provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleMapsConfig {
    /// API key sent as the `key` parameter
    pub api_key: String,

    /// Base URL of the Maps web services
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "https://maps.googleapis.com".to_string()
}

impl GoogleMapsConfig {
    /// Configuration for the public endpoint
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
        }
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            api_key: "test-key".to_string(),
            base_url: base_url.into(),
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}
