//! Geocoder errors

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::value_objects::Capability;

/// A single field-level problem found while validating a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Wire name of the offending field (`query` for the query as a whole)
    pub field: String,
    /// Machine-readable violation code
    pub code: String,
    /// Human-readable description
    pub message: String,
}

impl FieldViolation {
    /// Create a violation
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    /// A field that is not part of the query's whitelist
    pub fn unknown_field(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("property {field} should not exist");
        Self::new(field, "unknown_field", message)
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Query validation failure carrying every violation found
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation error: {}", summarize(.violations))]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Create a validation error from a list of violations
    #[must_use]
    pub const fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// All violations, in the order they were found
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether a violation was reported for the given wire field name
    #[must_use]
    pub fn has_violation_for(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Errors surfaced by geocoding operations
#[derive(Debug, Error)]
pub enum GeocoderError {
    /// The query failed whitelist, type or value checks
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transport failure, non-2xx status, unparseable body or provider error status
    #[error("Invalid server response: {0}")]
    InvalidServerResponse(String),

    /// The provider reported that a rate or quota limit was hit
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// An accuracy value reached the filter without a matching predicate
    #[error("Unsupported \"{0}\" accuracy")]
    UnsupportedAccuracy(String),

    /// The selected provider does not implement the requested operation
    #[error("{provider} does not support {capability}")]
    UnsupportedCapability {
        /// Provider name
        provider: String,
        /// Requested operation
        capability: Capability,
    },

    /// No provider is registered with the dispatcher
    #[error("No provider registered")]
    NoProvider,

    /// Several providers are registered and none was selected
    #[error("Provider selection is ambiguous, registered: {}", .0.join(", "))]
    AmbiguousProvider(Vec<String>),

    /// The requested provider is not registered
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Invalid dispatcher or provider setup
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GeocoderError {
    /// Create an invalid server response error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidServerResponse(message.into())
    }

    /// Create a quota exceeded error
    pub fn quota_exceeded(message: impl Into<String>) -> Self {
        Self::QuotaExceeded(message.into())
    }

    /// Create an unsupported capability error
    pub fn unsupported(provider: impl Into<String>, capability: Capability) -> Self {
        Self::UnsupportedCapability {
            provider: provider.into(),
            capability,
        }
    }

    /// True for every failure caused by the provider's response,
    /// quota failures included
    #[must_use]
    pub const fn is_server_response(&self) -> bool {
        matches!(self, Self::InvalidServerResponse(_) | Self::QuotaExceeded(_))
    }

    /// True when the provider reported rate or quota limiting
    #[must_use]
    pub const fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::QuotaExceeded(_))
    }

    /// True for caller or setup mistakes rather than data conditions
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedCapability { .. }
                | Self::NoProvider
                | Self::AmbiguousProvider(_)
                | Self::UnknownProvider(_)
                | Self::Configuration(_)
        )
    }

    /// Field violations when this is a validation failure
    #[must_use]
    pub fn violations(&self) -> Option<&[FieldViolation]> {
        match self {
            Self::Validation(err) => Some(err.violations()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_field_violation_names_the_field() {
        let violation = FieldViolation::unknown_field("foo");
        assert_eq!(violation.field, "foo");
        assert_eq!(violation.code, "unknown_field");
        assert_eq!(violation.to_string(), "foo: property foo should not exist");
    }

    #[test]
    fn validation_error_lists_every_violation() {
        let err = ValidationError::new(vec![
            FieldViolation::unknown_field("foo"),
            FieldViolation::new("limit", "range", "must be at least 1"),
        ]);
        assert_eq!(err.violations().len(), 2);
        assert!(err.has_violation_for("limit"));
        assert!(!err.has_violation_for("address"));
        assert_eq!(
            err.to_string(),
            "Validation error: foo: property foo should not exist; limit: must be at least 1"
        );
    }

    #[test]
    fn validation_converts_into_geocoder_error() {
        let err: GeocoderError =
            ValidationError::new(vec![FieldViolation::unknown_field("foo")]).into();
        assert!(err.to_string().starts_with("Validation error"));
        assert_eq!(err.violations().map(<[_]>::len), Some(1));
    }

    #[test]
    fn quota_is_a_server_response_failure() {
        let quota = GeocoderError::quota_exceeded("OVER_QUERY_LIMIT");
        assert!(quota.is_server_response());
        assert!(quota.is_quota_exceeded());

        let invalid = GeocoderError::invalid_response("HTTP 500");
        assert!(invalid.is_server_response());
        assert!(!invalid.is_quota_exceeded());
    }

    #[test]
    fn invalid_response_message_is_kept() {
        let err = GeocoderError::invalid_response("Some other error");
        assert_eq!(err.to_string(), "Invalid server response: Some other error");
    }

    #[test]
    fn unsupported_capability_message() {
        let err = GeocoderError::unsupported("MapQuestProvider", Capability::Suggest);
        assert_eq!(err.to_string(), "MapQuestProvider does not support suggest");
        assert!(err.is_configuration());
        assert!(!err.is_server_response());
    }

    #[test]
    fn ambiguous_provider_lists_names() {
        let err = GeocoderError::AmbiguousProvider(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(err.to_string(), "Provider selection is ambiguous, registered: A, B");
    }

    #[test]
    fn unsupported_accuracy_message() {
        let err = GeocoderError::UnsupportedAccuracy("bogus".to_string());
        assert_eq!(err.to_string(), "Unsupported \"bogus\" accuracy");
    }
}
