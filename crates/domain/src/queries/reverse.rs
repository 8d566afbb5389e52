//! Reverse geocoding query

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Query;
use crate::value_objects::Accuracy;

/// Resolve a coordinate pair into locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReverseQuery {
    #[validate(range(min = -90.0, max = 90.0, message = "lat must be between -90 and 90"))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "lon must be between -180 and 180"))]
    pub lon: f64,

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

impl ReverseQuery {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            country_code: None,
            language: None,
            limit: None,
            accuracy: None,
        }
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

impl Query for ReverseQuery {
    const FIELDS: &'static [&'static str] = &[
        "lat",
        "lon",
        "countryCode",
        "language",
        "limit",
        "accuracy",
    ];

    fn accuracy(&self) -> Option<&Accuracy> {
        self.accuracy.as_ref()
    }

    fn limit(&self) -> Option<u32> {
        self.limit
    }
}
