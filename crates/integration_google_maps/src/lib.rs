//! Google Maps provider
//!
//! Implements every capability on top of the
//! [Geocoding](https://developers.google.com/maps/documentation/geocoding) and
//! [Places](https://developers.google.com/maps/documentation/places/web-service)
//! web services.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_google_maps::{GoogleMapsConfig, GoogleMapsProvider};
//!
//! let provider = GoogleMapsProvider::new(&GoogleMapsConfig::new(api_key), transport, context);
//! let geocoder = Geocoder::builder().provider(provider).build()?;
//! let locations = geocoder.geocode(&json!({ "address": "1158 E 89th St, Chicago, IL" })).await?;
//! ```

mod config;
mod models;
mod provider;
mod request;
mod response;

pub use config::GoogleMapsConfig;
pub use provider::GoogleMapsProvider;
