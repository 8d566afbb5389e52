//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{Map, Value, json};

/// Geocoder CLI
#[derive(Debug, Parser)]
#[command(name = "geocoder-cli")]
#[command(author, version, about = "Geocode addresses through Google Maps, ArcGIS or MapQuest", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./geocoder.toml when present)
    #[arg(short, long, env = "GEOCODER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Provider to use, e.g. GoogleMapsProvider (defaults to the configured default)
    #[arg(short, long, global = true)]
    pub provider: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find locations matching an address
    ///
    /// Example: geocoder-cli geocode "1158 E 89th St, Chicago, IL 60619" --limit 1
    Geocode {
        address: String,

        /// ISO country code restricting the search
        #[arg(long)]
        country_code: Option<String>,

        #[arg(long)]
        language: Option<String>,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<u32>,

        /// Required accuracy: HOUSE_NUMBER, STREET_NAME, CITY, STATE or COUNTRY
        #[arg(short, long)]
        accuracy: Option<String>,
    },

    /// Find locations at a coordinate pair
    ///
    /// Example: geocoder-cli reverse 41.7307 -87.5956
    #[command(allow_negative_numbers = true)]
    Reverse {
        lat: f64,
        lon: f64,

        #[arg(long)]
        country_code: Option<String>,

        #[arg(long)]
        language: Option<String>,

        #[arg(short, long)]
        limit: Option<u32>,

        #[arg(short, long)]
        accuracy: Option<String>,
    },

    /// Autocomplete a partial address
    Suggest {
        address: String,

        #[arg(long)]
        country_code: Option<String>,

        #[arg(long)]
        language: Option<String>,

        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Resolve a place identifier returned by suggest
    PlaceDetails {
        place_id: String,

        #[arg(long)]
        language: Option<String>,
    },

    /// List the configured providers
    Providers,
}

impl Commands {
    /// Raw query object handed to the geocoder, `None` for non-query commands
    ///
    /// Flags map to the camelCase query fields; validation is left to the
    /// geocoder so the CLI reports the same violations as any other caller.
    pub fn to_query(&self) -> Option<Value> {
        let mut query = Map::new();
        match self {
            Self::Geocode {
                address,
                country_code,
                language,
                limit,
                accuracy,
            } => {
                query.insert("address".to_string(), json!(address));
                insert_opt(&mut query, "countryCode", country_code.clone().map(Value::from));
                insert_opt(&mut query, "language", language.clone().map(Value::from));
                insert_opt(&mut query, "limit", limit.map(Value::from));
                insert_opt(&mut query, "accuracy", accuracy.clone().map(Value::from));
            },
            Self::Reverse {
                lat,
                lon,
                country_code,
                language,
                limit,
                accuracy,
            } => {
                query.insert("lat".to_string(), json!(lat));
                query.insert("lon".to_string(), json!(lon));
                insert_opt(&mut query, "countryCode", country_code.clone().map(Value::from));
                insert_opt(&mut query, "language", language.clone().map(Value::from));
                insert_opt(&mut query, "limit", limit.map(Value::from));
                insert_opt(&mut query, "accuracy", accuracy.clone().map(Value::from));
            },
            Self::Suggest {
                address,
                country_code,
                language,
                limit,
            } => {
                query.insert("address".to_string(), json!(address));
                insert_opt(&mut query, "countryCode", country_code.clone().map(Value::from));
                insert_opt(&mut query, "language", language.clone().map(Value::from));
                insert_opt(&mut query, "limit", limit.map(Value::from));
            },
            Self::PlaceDetails { place_id, language } => {
                query.insert("placeId".to_string(), json!(place_id));
                insert_opt(&mut query, "language", language.clone().map(Value::from));
            },
            Self::Providers => return None,
        }
        Some(Value::Object(query))
    }
}

fn insert_opt(query: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        query.insert(key.to_string(), value);
    }
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}
