//! Raw Google Maps API response shapes

use serde::Deserialize;
use serde_json::Value;

/// Envelope shared by geocode and reverse responses
#[derive(Debug, Deserialize)]
pub(crate) struct RawGeocodeResponse {
    pub status: Option<String>,
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAutocompleteResponse {
    pub status: Option<String>,
    pub error_message: Option<String>,
    #[serde(default)]
    pub predictions: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPlaceDetailsResponse {
    pub status: Option<String>,
    pub error_message: Option<String>,
    pub result: Option<Value>,
}

/// One geocoding result or place details result
#[derive(Debug, Deserialize)]
pub(crate) struct RawPlace {
    pub formatted_address: Option<String>,
    pub geometry: Option<RawGeometry>,
    #[serde(default)]
    pub address_components: Vec<RawAddressComponent>,
    pub place_id: Option<String>,
}

impl RawPlace {
    /// First component carrying the given type
    pub fn component(&self, kind: &str) -> Option<&RawAddressComponent> {
        self.address_components
            .iter()
            .find(|c| c.types.iter().any(|t| t == kind))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawGeometry {
    pub location: RawLatLng,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPrediction {
    pub description: Option<String>,
    pub place_id: Option<String>,
}
