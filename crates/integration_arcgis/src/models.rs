//! Raw ArcGIS REST response shapes

use serde::Deserialize;
use serde_json::Value;

/// Error envelope returned with HTTP 200
#[derive(Debug, Deserialize)]
pub(crate) struct RawErrorEnvelope {
    pub error: Option<RawError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawError {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCandidatesResponse {
    pub candidates: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCandidate {
    pub address: Option<String>,
    pub location: Option<RawPoint>,
    #[serde(default)]
    pub attributes: RawAttributes,
}

/// Address attributes of a candidate (`outFields=*`)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawAttributes {
    pub long_label: Option<String>,
    pub add_num: Option<String>,
    pub st_addr: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub region_abbr: Option<String>,
    pub postal: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawReverseResponse {
    pub address: Option<RawReverseAddress>,
    pub location: Option<RawPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawReverseAddress {
    #[serde(rename = "Match_addr")]
    pub match_addr: Option<String>,
    pub long_label: Option<String>,
    pub add_num: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub region_abbr: Option<String>,
    pub postal: Option<String>,
    pub country_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSuggestResponse {
    pub suggestions: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSuggestion {
    pub text: Option<String>,
    pub magic_key: Option<String>,
}
