//! ArcGIS configuration

use serde::{Deserialize, Serialize};

/// Configuration for the ArcGIS provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcgisConfig {
    /// Base URL of the GeocodeServer
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional access token; anonymous requests are rate limited by the service
    #[serde(default)]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer".to_string()
}

impl Default for ArcgisConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
        }
    }
}

impl ArcgisConfig {
    /// Use an access token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    pub(crate) fn endpoint(&self, operation: &str) -> String {
        format!("{}/{operation}", self.base_url.trim_end_matches('/'))
    }
}
