//! Location entity and its builder

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::GeocoderError;
use crate::value_objects::Coordinates;

/// A normalized geocoding result
///
/// Produced once per raw provider result. `raw` keeps the untouched provider
/// fragment the location was parsed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Full, human-readable address
    pub formatted_address: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Country name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// ISO 3166-1 country code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// First-level subdivision name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// First-level subdivision code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    /// City or locality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Street name without house number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    /// House number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    /// Postal code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Provider-specific place identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    /// Name of the provider that produced this location
    pub provider: String,
    /// Untouched provider response fragment
    #[serde(default)]
    pub raw: Value,
}

impl Location {
    /// Whether both a country name and code are known
    #[must_use]
    pub const fn has_canonical_country(&self) -> bool {
        self.country.is_some() && self.country_code.is_some()
    }
}

/// Collects parsed provider fields before they become a [`Location`]
///
/// Provider parsers assign whatever fields their response carries. Empty and
/// whitespace-only strings are treated as absent when the location is built.
#[derive(Debug, Clone, Default)]
pub struct LocationBuilder {
    provider: String,
    raw: Value,
    /// Full address
    pub formatted_address: Option<String>,
    /// Latitude
    pub latitude: Option<f64>,
    /// Longitude
    pub longitude: Option<f64>,
    /// Country name
    pub country: Option<String>,
    /// Country code
    pub country_code: Option<String>,
    /// State name
    pub state: Option<String>,
    /// State code
    pub state_code: Option<String>,
    /// City
    pub city: Option<String>,
    /// Street name
    pub street_name: Option<String>,
    /// House number
    pub house_number: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// Place identifier
    pub place_id: Option<String>,
}

impl LocationBuilder {
    /// Start a builder for one raw provider fragment
    pub fn new(provider: impl Into<String>, raw: Value) -> Self {
        Self {
            provider: provider.into(),
            raw,
            ..Self::default()
        }
    }

    /// Name of the provider the fragment came from
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// The raw provider fragment
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.raw
    }

    /// Build the location
    ///
    /// # Errors
    ///
    /// Returns `InvalidServerResponse` when the formatted address or either
    /// coordinate is missing, or the coordinates are out of range.
    pub fn build(self) -> Result<Location, GeocoderError> {
        let formatted_address = non_empty(self.formatted_address).ok_or_else(|| {
            GeocoderError::invalid_response(format!(
                "{} result has no formatted address",
                self.provider
            ))
        })?;

        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(GeocoderError::invalid_response(format!(
                "{} result has no coordinates",
                self.provider
            )));
        };
        let coordinates = Coordinates::new(latitude, longitude)
            .map_err(|e| GeocoderError::invalid_response(e.to_string()))?;

        Ok(Location {
            formatted_address,
            latitude: coordinates.latitude(),
            longitude: coordinates.longitude(),
            country: non_empty(self.country),
            country_code: non_empty(self.country_code),
            state: non_empty(self.state),
            state_code: non_empty(self.state_code),
            city: non_empty(self.city),
            street_name: non_empty(self.street_name),
            house_number: non_empty(self.house_number),
            postal_code: non_empty(self.postal_code),
            place_id: non_empty(self.place_id),
            provider: self.provider,
            raw: self.raw,
        })
    }
}

/// Trim a string and drop it when nothing is left
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == v.len() {
            Some(v)
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chicago_builder() -> LocationBuilder {
        let mut builder = LocationBuilder::new("GoogleMapsProvider", json!({"place_id": "abc"}));
        builder.formatted_address = Some("1158 E 89th St, Chicago, IL 60619, USA".to_string());
        builder.latitude = Some(41.734_018_6);
        builder.longitude = Some(-87.596_076_2);
        builder.city = Some("Chicago".to_string());
        builder
    }

    #[test]
    fn builds_location_with_raw_and_provider() {
        let location = chicago_builder().build().unwrap();
        assert_eq!(location.provider, "GoogleMapsProvider");
        assert_eq!(location.raw, json!({"place_id": "abc"}));
        assert_eq!(location.city.as_deref(), Some("Chicago"));
        assert!(location.house_number.is_none());
    }

    #[test]
    fn empty_strings_become_none() {
        let mut builder = chicago_builder();
        builder.state = Some(String::new());
        builder.postal_code = Some("   ".to_string());
        builder.street_name = Some(" E 89th St ".to_string());

        let location = builder.build().unwrap();
        assert!(location.state.is_none());
        assert!(location.postal_code.is_none());
        assert_eq!(location.street_name.as_deref(), Some("E 89th St"));
    }

    #[test]
    fn missing_coordinates_is_invalid_response() {
        let mut builder = chicago_builder();
        builder.longitude = None;

        let err = builder.build().unwrap_err();
        assert!(matches!(err, GeocoderError::InvalidServerResponse(_)));
    }

    #[test]
    fn missing_address_is_invalid_response() {
        let mut builder = chicago_builder();
        builder.formatted_address = Some(String::new());

        let err = builder.build().unwrap_err();
        assert!(err.to_string().contains("formatted address"));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let mut builder = chicago_builder();
        builder.latitude = Some(140.0);

        assert!(builder.build().is_err());
    }

    #[test]
    fn serializes_camel_case_without_empty_fields() {
        let location = chicago_builder().build().unwrap();
        let value = serde_json::to_value(&location).unwrap();

        assert_eq!(value["formattedAddress"], "1158 E 89th St, Chicago, IL 60619, USA");
        assert_eq!(value["city"], "Chicago");
        assert!(value.get("houseNumber").is_none());
        assert!(value.get("countryCode").is_none());
    }
}
