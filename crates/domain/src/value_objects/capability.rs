//! Provider capability value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// An operation a provider may or may not support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    /// Address to locations
    Geocode,
    /// Coordinates to locations
    Reverse,
    /// Autocomplete suggestions for partial input
    Suggest,
    /// Full location for a provider place identifier
    PlaceDetails,
}

impl Capability {
    /// All capabilities in declaration order
    pub const ALL: [Self; 4] = [Self::Geocode, Self::Reverse, Self::Suggest, Self::PlaceDetails];

    /// Operation name as used in the public call surface
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Geocode => "geocode",
            Self::Reverse => "reverse",
            Self::Suggest => "suggest",
            Self::PlaceDetails => "placeDetails",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
