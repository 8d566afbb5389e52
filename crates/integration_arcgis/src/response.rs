//! Response parsers for the ArcGIS GeocodeServer operations

use domain::{GeocoderError, LocationBuilder, SuggestionBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{
    RawCandidate, RawCandidatesResponse, RawErrorEnvelope, RawReverseResponse, RawSuggestResponse,
    RawSuggestion,
};
use crate::provider::PROVIDER_NAME;

const QUOTA_ERROR_CODE: i64 = 429;

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, GeocoderError> {
    serde_json::from_value(value)
        .map_err(|e| GeocoderError::invalid_response(format!("unexpected ArcGIS payload: {e}")))
}

/// Whether the body is an "address not found" error, which means no results
fn is_not_found(code: i64, details: &[String]) -> bool {
    code == 400 && details.iter().any(|d| d.contains("Unable to find address"))
}

/// Fails on the error envelope, returns `false` when the body reports no match
fn check_error(body: &Value) -> Result<bool, GeocoderError> {
    if body.get("error").is_none() {
        return Ok(true);
    }
    let Some(error) = decode::<RawErrorEnvelope>(body.clone())?.error else {
        return Ok(true);
    };

    if is_not_found(error.code, &error.details) {
        debug!("ArcGIS found no address");
        return Ok(false);
    }
    let message = if error.message.is_empty() {
        format!("ArcGIS error {}", error.code)
    } else {
        error.message
    };
    if error.code == QUOTA_ERROR_CODE {
        warn!(code = error.code, "ArcGIS quota exceeded");
        return Err(GeocoderError::quota_exceeded(message));
    }
    Err(GeocoderError::invalid_response(message))
}

/// Street part of a street address without its leading house number
fn street_name(street_address: Option<&str>, house_number: Option<&str>) -> Option<String> {
    let street = street_address?.trim();
    let stripped = house_number
        .filter(|n| !n.is_empty())
        .and_then(|n| street.strip_prefix(n))
        .map_or(street, str::trim_start);
    Some(stripped.to_string())
}

fn candidate_location(raw: Value) -> Result<LocationBuilder, GeocoderError> {
    let candidate: RawCandidate = decode(raw.clone())?;
    let attributes = candidate.attributes;
    let mut builder = LocationBuilder::new(PROVIDER_NAME, raw);

    builder.formatted_address = attributes.long_label.or(candidate.address);
    if let Some(point) = candidate.location {
        builder.latitude = Some(point.y);
        builder.longitude = Some(point.x);
    }
    builder.street_name = street_name(attributes.st_addr.as_deref(), attributes.add_num.as_deref());
    builder.house_number = attributes.add_num;
    builder.city = attributes.city;
    builder.state = attributes.region;
    builder.state_code = attributes.region_abbr;
    builder.postal_code = attributes.postal;
    // ISO 3166-1 alpha-3, normalized by enrichment
    builder.country_code = attributes.country;

    Ok(builder)
}

/// Parse a `findAddressCandidates` response
pub(crate) fn parse_candidates(body: Value) -> Result<Vec<LocationBuilder>, GeocoderError> {
    if !check_error(&body)? {
        return Ok(Vec::new());
    }
    let response: RawCandidatesResponse = decode(body)?;
    response.candidates.into_iter().map(candidate_location).collect()
}

/// Parse a `reverseGeocode` response
pub(crate) fn parse_reverse(body: Value) -> Result<Vec<LocationBuilder>, GeocoderError> {
    if !check_error(&body)? {
        return Ok(Vec::new());
    }
    let response: RawReverseResponse = decode(body.clone())?;
    let Some(address) = response.address else {
        return Err(GeocoderError::invalid_response(
            "ArcGIS reverse response has no address",
        ));
    };

    let mut builder = LocationBuilder::new(PROVIDER_NAME, body);
    builder.formatted_address = address.long_label.or(address.match_addr);
    if let Some(point) = response.location {
        builder.latitude = Some(point.y);
        builder.longitude = Some(point.x);
    }
    builder.street_name = street_name(address.address.as_deref(), address.add_num.as_deref());
    builder.house_number = address.add_num;
    builder.city = address.city;
    builder.state = address.region;
    builder.state_code = address.region_abbr;
    builder.postal_code = address.postal;
    builder.country_code = address.country_code;

    Ok(vec![builder])
}

/// Parse a `suggest` response
pub(crate) fn parse_suggestions(body: Value) -> Result<Vec<SuggestionBuilder>, GeocoderError> {
    if !check_error(&body)? {
        return Ok(Vec::new());
    }
    let response: RawSuggestResponse = decode(body)?;
    response
        .suggestions
        .into_iter()
        .map(|raw| {
            let suggestion: RawSuggestion = decode(raw.clone())?;
            let mut builder = SuggestionBuilder::new(PROVIDER_NAME, raw);
            builder.formatted_address = suggestion.text;
            builder.place_id = suggestion.magic_key;
            Ok(builder)
        })
        .collect()
}
