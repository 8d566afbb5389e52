//! Response parsers for the Google Maps web services

use domain::{GeocoderError, LocationBuilder, SuggestionBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::models::{
    RawAutocompleteResponse, RawGeocodeResponse, RawPlace, RawPlaceDetailsResponse, RawPrediction,
};
use crate::provider::PROVIDER_NAME;

/// Outcome of the `status` field of a response
enum Status {
    Ok,
    ZeroResults,
}

fn check_status(status: Option<&str>, error_message: Option<&str>) -> Result<Status, GeocoderError> {
    let describe = |fallback: &str| error_message.unwrap_or(fallback).to_string();
    match status {
        Some("OK") => Ok(Status::Ok),
        Some("ZERO_RESULTS") => Ok(Status::ZeroResults),
        Some(quota @ ("OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT")) => {
            warn!(status = quota, "Google Maps quota exceeded");
            Err(GeocoderError::quota_exceeded(describe(quota)))
        },
        Some(other) => Err(GeocoderError::invalid_response(describe(other))),
        None => Err(GeocoderError::invalid_response(describe("missing status"))),
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, GeocoderError> {
    serde_json::from_value(value)
        .map_err(|e| GeocoderError::invalid_response(format!("unexpected Google Maps payload: {e}")))
}

fn location_from(raw: Value) -> Result<LocationBuilder, GeocoderError> {
    let place: RawPlace = decode(raw.clone())?;
    let mut builder = LocationBuilder::new(PROVIDER_NAME, raw);

    builder.formatted_address = place.formatted_address.clone();
    if let Some(geometry) = &place.geometry {
        builder.latitude = Some(geometry.location.lat);
        builder.longitude = Some(geometry.location.lng);
    }
    builder.house_number = place.component("street_number").map(|c| c.long_name.clone());
    builder.street_name = place.component("route").map(|c| c.long_name.clone());
    builder.city = place
        .component("locality")
        .or_else(|| place.component("postal_town"))
        .map(|c| c.long_name.clone());
    if let Some(state) = place.component("administrative_area_level_1") {
        builder.state = Some(state.long_name.clone());
        builder.state_code = Some(state.short_name.clone());
    }
    if let Some(country) = place.component("country") {
        builder.country = Some(country.long_name.clone());
        builder.country_code = Some(country.short_name.clone());
    }
    builder.postal_code = place.component("postal_code").map(|c| c.long_name.clone());
    builder.place_id = place.place_id;

    Ok(builder)
}

/// Parse a geocode or reverse response
pub(crate) fn parse_locations(body: Value) -> Result<Vec<LocationBuilder>, GeocoderError> {
    let response: RawGeocodeResponse = decode(body)?;
    match check_status(response.status.as_deref(), response.error_message.as_deref())? {
        Status::ZeroResults => Ok(Vec::new()),
        Status::Ok => response.results.into_iter().map(location_from).collect(),
    }
}

/// Parse a place details response
pub(crate) fn parse_place_details(body: Value) -> Result<Vec<LocationBuilder>, GeocoderError> {
    let response: RawPlaceDetailsResponse = decode(body)?;
    match check_status(response.status.as_deref(), response.error_message.as_deref())? {
        Status::ZeroResults => Ok(Vec::new()),
        Status::Ok => response.result.map(location_from).into_iter().collect(),
    }
}

/// Parse an autocomplete response
pub(crate) fn parse_suggestions(body: Value) -> Result<Vec<SuggestionBuilder>, GeocoderError> {
    let response: RawAutocompleteResponse = decode(body)?;
    match check_status(response.status.as_deref(), response.error_message.as_deref())? {
        Status::ZeroResults => Ok(Vec::new()),
        Status::Ok => response
            .predictions
            .into_iter()
            .map(|raw| {
                let prediction: RawPrediction = decode(raw.clone())?;
                let mut builder = SuggestionBuilder::new(PROVIDER_NAME, raw);
                builder.formatted_address = prediction.description;
                builder.place_id = prediction.place_id;
                Ok(builder)
            })
            .collect(),
    }
}
