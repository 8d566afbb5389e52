//! Forward geocoding query

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Query;
use crate::value_objects::Accuracy;

/// Resolve a free-text address into locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeocodeQuery {
    #[validate(length(min = 1, message = "address should not be empty"))]
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(equal = 2, message = "countryCode must be a 2-letter code"))]
    pub country_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 5, message = "language must be 2 to 5 characters"))]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "limit must be at least 1"))]
    pub limit: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<Accuracy>,
}

impl GeocodeQuery {
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            country_code: None,
            language: None,
            limit: None,
            accuracy: None,
        }
    }

    #[must_use]
    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_accuracy(mut self, accuracy: Accuracy) -> Self {
        self.accuracy = Some(accuracy);
        self
    }
}

impl Query for GeocodeQuery {
    const FIELDS: &'static [&'static str] =
        &["address", "countryCode", "language", "limit", "accuracy"];

    fn accuracy(&self) -> Option<&Accuracy> {
        self.accuracy.as_ref()
    }

    fn limit(&self) -> Option<u32> {
        self.limit
    }
}
