//! MapQuest requests, response parsing and provider assembly

use std::fmt;
use std::sync::Arc;

use application::{
    GeocodeCapability, HttpCommand, HttpRequest, HttpTransportPort, LocationCommand,
    NamedProvider, PipelineContext, Provider, ReverseCapability,
};
use domain::{GeocodeQuery, GeocoderError, LocationBuilder, ReverseQuery};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::MapQuestConfig;
use crate::models::{RawLocation, RawResponse};

const PROVIDER_NAME: &str = "MapQuestProvider";
const QUOTA_STATUS: i64 = 403;

fn base_request(config: &MapQuestConfig, path: &str) -> HttpRequest {
    HttpRequest::get(config.endpoint(path))
        .param("key", &config.api_key)
        .param("thumbMaps", "false")
        .param("outFormat", "json")
}

fn geocode_request(config: &MapQuestConfig, query: &GeocodeQuery) -> HttpRequest {
    base_request(config, "/geocoding/v1/address")
        .param("location", &query.address)
        .param_opt("maxResults", query.limit)
}

fn reverse_request(config: &MapQuestConfig, query: &ReverseQuery) -> HttpRequest {
    base_request(config, "/geocoding/v1/reverse")
        .param("location", format!("{},{}", query.lat, query.lon))
}

fn check_status(response: &RawResponse) -> Result<(), GeocoderError> {
    let Some(info) = &response.info else {
        return Err(GeocoderError::invalid_response("MapQuest response has no info block"));
    };
    if info.statuscode == 0 {
        return Ok(());
    }

    let message = if info.messages.is_empty() {
        format!("MapQuest status {}", info.statuscode)
    } else {
        info.messages.join("; ")
    };
    let mentions_limit = info
        .messages
        .iter()
        .any(|m| m.to_lowercase().contains("limit"));
    if info.statuscode == QUOTA_STATUS && mentions_limit {
        warn!(status = info.statuscode, "MapQuest quota exceeded");
        return Err(GeocoderError::quota_exceeded(message));
    }
    Err(GeocoderError::invalid_response(message))
}

/// Split a leading numeric token off a street line
fn split_house_number(street: &str) -> (Option<String>, Option<String>) {
    let street = street.trim();
    match street.split_once(' ') {
        Some((first, rest)) if first.chars().next().is_some_and(|c| c.is_ascii_digit()) => {
            (Some(first.to_string()), Some(rest.trim().to_string()))
        },
        _ => (None, Some(street.to_string())),
    }
}

fn compose_address(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn location_from(raw: Value) -> Result<LocationBuilder, GeocoderError> {
    let location: RawLocation = serde_json::from_value(raw.clone())
        .map_err(|e| GeocoderError::invalid_response(format!("unexpected MapQuest payload: {e}")))?;
    let mut builder = LocationBuilder::new(PROVIDER_NAME, raw);

    builder.formatted_address = Some(compose_address(&[
        location.street.as_str(),
        location.admin_area5.as_str(),
        location.admin_area3.as_str(),
        location.postal_code.as_str(),
        location.admin_area1.as_str(),
    ]));
    if let Some(lat_lng) = &location.lat_lng {
        builder.latitude = Some(lat_lng.lat);
        builder.longitude = Some(lat_lng.lng);
    }

    let (house_number, street_name) = split_house_number(&location.street);
    builder.house_number = house_number;
    builder.street_name = street_name;
    builder.city = Some(location.admin_area5);
    builder.postal_code = Some(location.postal_code);

    if location.admin_area3.chars().count() <= 3 {
        builder.state_code = Some(location.admin_area3);
    } else {
        builder.state = Some(location.admin_area3);
    }
    if location.admin_area1.chars().count() <= 3 {
        builder.country_code = Some(location.admin_area1);
    } else {
        builder.country = Some(location.admin_area1);
    }

    Ok(builder)
}

/// Parse a geocode or reverse response
fn parse_locations(body: Value) -> Result<Vec<LocationBuilder>, GeocoderError> {
    let response: RawResponse = serde_json::from_value(body)
        .map_err(|e| GeocoderError::invalid_response(format!("unexpected MapQuest payload: {e}")))?;
    check_status(&response)?;

    response
        .results
        .into_iter()
        .flat_map(|result| result.locations)
        .map(location_from)
        .collect()
}

/// MapQuest provider supporting geocode and reverse
pub struct MapQuestProvider {
    geocode: LocationCommand<GeocodeQuery>,
    reverse: LocationCommand<ReverseQuery>,
}

impl MapQuestProvider {
    pub fn new(
        config: &MapQuestConfig,
        transport: Arc<dyn HttpTransportPort>,
        context: PipelineContext,
    ) -> Self {
        debug!(base_url = %config.base_url, "Assembling MapQuest provider");
        let geocode_config = config.clone();
        let reverse_config = config.clone();

        Self {
            geocode: LocationCommand::new(
                HttpCommand::new(
                    "MapQuestGeocode",
                    Arc::clone(&transport),
                    move |query: &GeocodeQuery| Ok(geocode_request(&geocode_config, query)),
                    parse_locations,
                ),
                context.clone(),
            ),
            reverse: LocationCommand::new(
                HttpCommand::new(
                    "MapQuestReverse",
                    transport,
                    move |query: &ReverseQuery| Ok(reverse_request(&reverse_config, query)),
                    parse_locations,
                ),
                context,
            ),
        }
    }
}

impl Provider for MapQuestProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn geocoder(&self) -> Option<&dyn GeocodeCapability> {
        Some(&self.geocode)
    }

    fn reverser(&self) -> Option<&dyn ReverseCapability> {
        Some(&self.reverse)
    }
}

impl NamedProvider for MapQuestProvider {
    const NAME: &'static str = PROVIDER_NAME;
}

impl fmt::Debug for MapQuestProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapQuestProvider").finish_non_exhaustive()
    }
}
