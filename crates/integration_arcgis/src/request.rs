//! Request builders for the ArcGIS GeocodeServer operations

use application::HttpRequest;
use domain::{GeocodeQuery, PlaceDetailsQuery, ReverseQuery, SuggestQuery};

use crate::config::ArcgisConfig;

fn base(config: &ArcgisConfig, operation: &str) -> HttpRequest {
    HttpRequest::get(config.endpoint(operation))
        .param("f", "json")
        .param_opt("token", config.token.as_ref())
}

pub(crate) fn geocode(config: &ArcgisConfig, query: &GeocodeQuery) -> HttpRequest {
    base(config, "findAddressCandidates")
        .param("SingleLine", &query.address)
        .param("outFields", "*")
        .param_opt("maxLocations", query.limit)
        .param_opt("langCode", query.language.as_ref())
        .param_opt("sourceCountry", query.country_code.as_ref())
}

pub(crate) fn reverse(config: &ArcgisConfig, query: &ReverseQuery) -> HttpRequest {
    base(config, "reverseGeocode")
        .param("location", format!("{},{}", query.lon, query.lat))
        .param_opt("langCode", query.language.as_ref())
}

pub(crate) fn suggest(config: &ArcgisConfig, query: &SuggestQuery) -> HttpRequest {
    base(config, "suggest")
        .param("text", &query.address)
        .param_opt("maxSuggestions", query.limit)
        .param_opt("countryCode", query.country_code.as_ref())
}

pub(crate) fn place_details(config: &ArcgisConfig, query: &PlaceDetailsQuery) -> HttpRequest {
    base(config, "findAddressCandidates")
        .param("magicKey", &query.place_id)
        .param("outFields", "*")
        .param_opt("langCode", query.language.as_ref())
}
