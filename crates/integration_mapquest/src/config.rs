//! MapQuest configuration

use serde::{Deserialize, Serialize};

/// Configuration for the MapQuest provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapQuestConfig {
    /// Consumer key sent as the `key` parameter
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "https://www.mapquestapi.com".to_string()
}

impl MapQuestConfig {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config: MapQuestConfig = serde_json::from_str(r#"{"api_key": "k"}"#).unwrap();
        assert_eq!(config, MapQuestConfig::new("k"));
        assert_eq!(config.endpoint("/geocoding/v1/address"), "https://www.mapquestapi.com/geocoding/v1/address");
    }
}
