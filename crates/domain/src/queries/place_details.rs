//! Place details query

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Query;

/// Fetch the full location behind a provider place identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlaceDetailsQuery {
    #[validate(length(min = 1, message = "placeId should not be empty"))]
    pub place_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 5, message = "language must be 2 to 5 characters"))]
    pub language: Option<String>,
}

impl PlaceDetailsQuery {
    #[must_use]
    pub fn new(place_id: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            language: None,
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

impl Query for PlaceDetailsQuery {
    const FIELDS: &'static [&'static str] = &["placeId", "language"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::parse_query;
    use serde_json::json;

    #[test]
    fn reports_camel_case_field_for_empty_place_id() {
        let err = parse_query::<PlaceDetailsQuery>(&json!({ "placeId": "" })).unwrap_err();
        assert!(err.has_violation_for("placeId"));
    }

    #[test]
    fn missing_place_id_is_reported() {
        let err = parse_query::<PlaceDetailsQuery>(&json!({ "language": "en" })).unwrap_err();
        assert!(err.has_violation_for("placeId"));
    }

    #[test]
    fn parses_language() {
        let query =
            parse_query::<PlaceDetailsQuery>(&json!({ "placeId": "abc", "language": "de" })).unwrap();
        assert_eq!(query, PlaceDetailsQuery::new("abc").with_language("de"));
    }
}
