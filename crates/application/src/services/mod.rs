//! Application services
//!
//! Query pipelines, provider capabilities and the dispatcher.

mod command;
mod geocoder;
mod location_command;
mod provider;
mod suggest_command;

pub use command::{Command, HttpCommand, PipelineContext, apply_limit};
pub use geocoder::{Geocoder, GeocoderBuilder, ProviderHandle};
pub use location_command::{LocationCommand, filter_by_accuracy};
pub use provider::{
    GeocodeCapability, NamedProvider, PlaceDetailsCapability, Provider, ReverseCapability,
    SuggestCapability,
};
pub use suggest_command::SuggestionCommand;
