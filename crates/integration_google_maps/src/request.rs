//! Request builders for the Google Maps web services

use application::HttpRequest;
use domain::{GeocodeQuery, PlaceDetailsQuery, ReverseQuery, SuggestQuery};

use crate::config::GoogleMapsConfig;

const GEOCODE_PATH: &str = "/maps/api/geocode/json";
const AUTOCOMPLETE_PATH: &str = "/maps/api/place/autocomplete/json";
const PLACE_DETAILS_PATH: &str = "/maps/api/place/details/json";

fn country_component(country_code: Option<&String>) -> Option<String> {
    country_code.map(|code| format!("country:{}", code.to_lowercase()))
}

pub(crate) fn geocode(config: &GoogleMapsConfig, query: &GeocodeQuery) -> HttpRequest {
    HttpRequest::get(config.endpoint(GEOCODE_PATH))
        .param("address", &query.address)
        .param("key", &config.api_key)
        .param_opt("language", query.language.as_ref())
        .param_opt("components", country_component(query.country_code.as_ref()))
}

pub(crate) fn reverse(config: &GoogleMapsConfig, query: &ReverseQuery) -> HttpRequest {
    HttpRequest::get(config.endpoint(GEOCODE_PATH))
        .param("latlng", format!("{},{}", query.lat, query.lon))
        .param("key", &config.api_key)
        .param_opt("language", query.language.as_ref())
}

pub(crate) fn suggest(config: &GoogleMapsConfig, query: &SuggestQuery) -> HttpRequest {
    HttpRequest::get(config.endpoint(AUTOCOMPLETE_PATH))
        .param("input", &query.address)
        .param("key", &config.api_key)
        .param("types", "geocode")
        .param_opt("language", query.language.as_ref())
        .param_opt("components", country_component(query.country_code.as_ref()))
}

pub(crate) fn place_details(config: &GoogleMapsConfig, query: &PlaceDetailsQuery) -> HttpRequest {
    HttpRequest::get(config.endpoint(PLACE_DETAILS_PATH))
        .param("placeid", &query.place_id)
        .param("key", &config.api_key)
        .param_opt("language", query.language.as_ref())
}
