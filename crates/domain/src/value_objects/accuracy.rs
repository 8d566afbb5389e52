//! Accuracy ladder value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every recognized level, most specific first
static LADDER: [Accuracy; 5] = [
    Accuracy::HouseNumber,
    Accuracy::StreetName,
    Accuracy::City,
    Accuracy::State,
    Accuracy::Country,
];

/// How specific a geocoding result must be
///
/// The recognized levels form a ladder ordered from the most specific
/// (`HOUSE_NUMBER`) to the least specific (`COUNTRY`). Wire values outside the
/// ladder are kept verbatim in [`Accuracy::Unrecognized`] so that they can be
/// reported instead of silently discarded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Accuracy {
    /// A house number is known
    HouseNumber,
    /// A street name is known
    StreetName,
    /// A city is known
    City,
    /// A state (first-level subdivision) is known
    State,
    /// A country is known
    Country,
    /// A value that is not part of the ladder
    Unrecognized(String),
}

impl Accuracy {
    /// The recognized levels in ladder order
    #[must_use]
    pub fn ladder() -> &'static [Self] {
        &LADDER
    }

    /// Wire representation of this level
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::HouseNumber => "HOUSE_NUMBER",
            Self::StreetName => "STREET_NAME",
            Self::City => "CITY",
            Self::State => "STATE",
            Self::Country => "COUNTRY",
            Self::Unrecognized(value) => value,
        }
    }

    /// Position on the ladder, `None` for unrecognized values
    #[must_use]
    pub fn rank(&self) -> Option<usize> {
        LADDER.iter().position(|level| level == self)
    }

    /// Whether this value is one of the ladder levels
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// All levels from this one down to the least specific, in ladder order
    ///
    /// `HOUSE_NUMBER` yields the whole ladder, `COUNTRY` only itself and an
    /// unrecognized value nothing.
    #[must_use]
    pub fn available_from(&self) -> Vec<Self> {
        slice_from(Self::ladder(), self)
    }
}

/// Returns the suffix of `items` that starts at the first occurrence of `start`
///
/// Returns an empty vector when `start` is not present.
pub fn slice_from<T: PartialEq + Clone>(items: &[T], start: &T) -> Vec<T> {
    items
        .iter()
        .position(|item| item == start)
        .map_or_else(Vec::new, |index| items[index..].to_vec())
}

impl From<String> for Accuracy {
    fn from(value: String) -> Self {
        match value.as_str() {
            "HOUSE_NUMBER" => Self::HouseNumber,
            "STREET_NAME" => Self::StreetName,
            "CITY" => Self::City,
            "STATE" => Self::State,
            "COUNTRY" => Self::Country,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<&str> for Accuracy {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Accuracy> for String {
    fn from(value: Accuracy) -> Self {
        match value {
            Accuracy::Unrecognized(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
