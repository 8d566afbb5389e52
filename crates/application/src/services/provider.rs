//! Provider capability interfaces
//!
//! A provider is a fixed bundle of pipelines, one per supported operation.
//! Operations it does not support stay `None` and fail at call time.

use async_trait::async_trait;
use domain::{GeocoderError, Location, Suggestion};
use serde_json::Value;

/// Forward geocoding
#[async_trait]
pub trait GeocodeCapability: Send + Sync {
    async fn geocode(&self, query: &Value) -> Result<Vec<Location>, GeocoderError>;
}

/// Reverse geocoding
#[async_trait]
pub trait ReverseCapability: Send + Sync {
    async fn reverse(&self, query: &Value) -> Result<Vec<Location>, GeocoderError>;
}

/// Autocomplete suggestions
#[async_trait]
pub trait SuggestCapability: Send + Sync {
    async fn suggest(&self, query: &Value) -> Result<Vec<Suggestion>, GeocoderError>;
}

/// Place details by provider place identifier
#[async_trait]
pub trait PlaceDetailsCapability: Send + Sync {
    async fn place_details(&self, query: &Value) -> Result<Location, GeocoderError>;
}

/// A geocoding provider
pub trait Provider: Send + Sync {
    /// Unique name, also stamped on every result the provider produces
    fn name(&self) -> &str;

    fn geocoder(&self) -> Option<&dyn GeocodeCapability> {
        None
    }

    fn reverser(&self) -> Option<&dyn ReverseCapability> {
        None
    }

    fn suggester(&self) -> Option<&dyn SuggestCapability> {
        None
    }

    fn place_details_finder(&self) -> Option<&dyn PlaceDetailsCapability> {
        None
    }
}

/// Compile-time provider name, used to select a provider by type
pub trait NamedProvider: Provider {
    const NAME: &'static str;
}
