//! Raw MapQuest API response shapes

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct RawResponse {
    pub info: Option<RawInfo>,
    #[serde(default)]
    pub results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawInfo {
    pub statuscode: i64,
    #[serde(default)]
    pub messages: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawResult {
    #[serde(default)]
    pub locations: Vec<Value>,
}

/// One matched location
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawLocation {
    #[serde(default)]
    pub street: String,
    /// City
    #[serde(default, rename = "adminArea5")]
    pub admin_area5: String,
    /// State or province, abbreviated in the US
    #[serde(default, rename = "adminArea3")]
    pub admin_area3: String,
    /// Country
    #[serde(default, rename = "adminArea1")]
    pub admin_area1: String,
    #[serde(default)]
    pub postal_code: String,
    pub lat_lng: Option<RawLatLng>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLatLng {
    pub lat: f64,
    pub lng: f64,
}
