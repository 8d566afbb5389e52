//! ArcGIS provider
//!
//! Implements every capability on top of the
//! [ArcGIS World Geocoding Service](https://developers.arcgis.com/rest/geocode/api-reference/overview-world-geocoding-service.htm).
//! Suggestions carry the service's `magicKey` as their place identifier, which
//! the place details operation accepts back.

mod config;
mod models;
mod provider;
mod request;
mod response;

pub use config::ArcgisConfig;
pub use provider::ArcgisProvider;
