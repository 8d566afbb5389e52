//! Query model
//!
//! Typed, validated query shapes. Each query declares the wire names it
//! accepts; [`parse_query`] turns caller-supplied plain data into a validated
//! instance and reports every problem it finds, not just the first.

mod geocode;
mod place_details;
mod reverse;
mod suggest;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use crate::errors::{FieldViolation, ValidationError};
use crate::value_objects::Accuracy;

pub use geocode::GeocodeQuery;
pub use place_details::PlaceDetailsQuery;
pub use reverse::ReverseQuery;
pub use suggest::SuggestQuery;

/// Contract shared by every query variant
pub trait Query: DeserializeOwned + Serialize + Validate + Send + Sync + 'static {
    /// Wire names of every field the query accepts
    const FIELDS: &'static [&'static str];

    /// Requested accuracy level, if any
    fn accuracy(&self) -> Option<&Accuracy> {
        None
    }

    /// Maximum number of results, if any
    fn limit(&self) -> Option<u32> {
        None
    }
}

/// Validate plain data against a query variant
///
/// Unknown fields are rejected (one violation per field), structural decoding
/// problems are reported, and every declared field is checked with the
/// `validator` rules of the variant.
///
/// # Errors
///
/// Returns a `ValidationError` carrying all violations found.
pub fn parse_query<Q: Query>(raw: &Value) -> Result<Q, ValidationError> {
    let Some(object) = raw.as_object() else {
        return Err(ValidationError::new(vec![FieldViolation::new(
            "query",
            "type",
            "query must be a JSON object",
        )]));
    };

    let mut violations: Vec<FieldViolation> = object
        .keys()
        .filter(|key| !Q::FIELDS.contains(&key.as_str()))
        .map(FieldViolation::unknown_field)
        .collect();

    let known: Map<String, Value> = object
        .iter()
        .filter(|(key, _)| Q::FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    match serde_json::from_value::<Q>(Value::Object(known)) {
        Ok(query) => {
            if let Err(errors) = query.validate() {
                violations.extend(violations_from(&errors));
            }
            if let Some(accuracy) = query.accuracy().filter(|a| !a.is_recognized()) {
                violations.push(FieldViolation::new(
                    "accuracy",
                    "enum",
                    format!(
                        "accuracy must be one of {}, got \"{accuracy}\"",
                        ladder_names()
                    ),
                ));
            }
            if violations.is_empty() {
                Ok(query)
            } else {
                Err(ValidationError::new(violations))
            }
        },
        Err(err) => {
            let message = err.to_string();
            violations.push(FieldViolation::new(
                decode_error_field(&message),
                "invalid",
                message,
            ));
            Err(ValidationError::new(violations))
        },
    }
}

fn ladder_names() -> String {
    Accuracy::ladder()
        .iter()
        .map(Accuracy::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Flatten `validator` errors into wire-named violations, sorted by field
fn violations_from(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            let field = to_camel_case(&field.to_string());
            errors.iter().map(move |error| {
                FieldViolation::new(
                    field.clone(),
                    error.code.to_string(),
                    error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string),
                )
            })
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

/// Pick the field name out of a serde "missing field" message
fn decode_error_field(message: &str) -> String {
    message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
        .unwrap_or("query")
        .to_string()
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.push(ch.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}
