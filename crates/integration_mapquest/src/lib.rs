//! MapQuest provider
//!
//! Forward and reverse geocoding through the
//! [MapQuest Geocoding API](https://developer.mapquest.com/documentation/geocoding-api/).
//! Suggestions and place details are not offered by this provider.

mod client;
mod config;
mod models;

pub use client::MapQuestProvider;
pub use config::MapQuestConfig;
