//! Suggestion entity and its builder

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::location::non_empty;
use crate::errors::GeocoderError;

/// An autocomplete suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Suggested address text
    pub formatted_address: String,
    /// Provider-specific identifier usable for a place details lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    /// Name of the provider that produced this suggestion
    pub provider: String,
    /// Untouched provider response fragment
    #[serde(default)]
    pub raw: Value,
}

/// Collects parsed provider fields before they become a [`Suggestion`]
#[derive(Debug, Clone, Default)]
pub struct SuggestionBuilder {
    provider: String,
    raw: Value,
    /// Suggested address text
    pub formatted_address: Option<String>,
    /// Place identifier
    pub place_id: Option<String>,
}

impl SuggestionBuilder {
    /// Start a builder for one raw provider fragment
    pub fn new(provider: impl Into<String>, raw: Value) -> Self {
        Self {
            provider: provider.into(),
            raw,
            ..Self::default()
        }
    }

    /// Name of the provider the fragment came from
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Build the suggestion
    ///
    /// # Errors
    ///
    /// Returns `InvalidServerResponse` when the suggestion text is missing.
    pub fn build(self) -> Result<Suggestion, GeocoderError> {
        let formatted_address = non_empty(self.formatted_address).ok_or_else(|| {
            GeocoderError::invalid_response(format!(
                "{} suggestion has no text",
                self.provider
            ))
        })?;

        Ok(Suggestion {
            formatted_address,
            place_id: non_empty(self.place_id),
            provider: self.provider,
            raw: self.raw,
        })
    }
}
