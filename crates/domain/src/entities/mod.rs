//! Domain entities - geocoding results

mod location;
mod suggestion;

pub use location::{Location, LocationBuilder};
pub use suggestion::{Suggestion, SuggestionBuilder};
