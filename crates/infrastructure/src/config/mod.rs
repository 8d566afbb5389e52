//! Application configuration
//!
//! Loaded from built-in defaults, an optional TOML file and `GEOCODER_*`
//! environment variables, in that order of precedence. Nested keys use a
//! double underscore, e.g. `GEOCODER_PROVIDERS__GOOGLE_MAPS__API_KEY`.

use std::path::{Path, PathBuf};

use application::NamedProvider;
use integration_arcgis::{ArcgisConfig, ArcgisProvider};
use integration_google_maps::{GoogleMapsConfig, GoogleMapsProvider};
use integration_mapquest::{MapQuestConfig, MapQuestProvider};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::adapters::{InMemoryReferenceData, ReferenceDataError};
use crate::http::HttpClientConfig;
pub use crate::telemetry::{LogFormat, LoggingConfig};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "GEOCODER";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The configuration loaded but is not usable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Reference dataset selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDataConfig {
    /// JSON dataset to use instead of the embedded one
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl ReferenceDataConfig {
    /// Load the configured dataset, falling back to the embedded one
    pub fn load(&self) -> Result<InMemoryReferenceData, ReferenceDataError> {
        match &self.path {
            Some(path) => InMemoryReferenceData::from_json_file(path),
            None => InMemoryReferenceData::embedded(),
        }
    }
}

/// Provider sections; a provider is registered only when its section is present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub google_maps: Option<GoogleMapsConfig>,

    #[serde(default)]
    pub arcgis: Option<ArcgisConfig>,

    #[serde(default)]
    pub mapquest: Option<MapQuestConfig>,
}

impl ProvidersConfig {
    /// Registration names of the configured providers
    #[must_use]
    pub fn configured_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.google_maps.is_some() {
            names.push(GoogleMapsProvider::NAME);
        }
        if self.arcgis.is_some() {
            names.push(ArcgisProvider::NAME);
        }
        if self.mapquest.is_some() {
            names.push(MapQuestProvider::NAME);
        }
        names
    }

    /// Whether no provider section is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configured_names().is_empty()
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Provider used when a call does not name one
    #[serde(default)]
    pub default_provider: Option<String>,

    #[serde(default)]
    pub http: HttpClientConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub reference_data: ReferenceDataConfig,

    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment
    ///
    /// Without an explicit path, `geocoder.toml` in the working directory is
    /// used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(
        path: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("geocoder").required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("http.connect_timeout_secs", 10)?
            .set_default("http.timeout_secs", 30)?
            .set_default("logging.filter", "warn")?
            .add_source(file)
            // Override with environment variables (e.g., GEOCODER_HTTP__TIMEOUT_SECS)
            .add_source(
                environment
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(
            providers = ?config.providers.configured_names(),
            default_provider = ?config.default_provider,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Check values the deserializer cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.connect_timeout_secs == 0 || self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "http timeouts must be greater than zero".to_string(),
            ));
        }

        if let Some(google) = &self.providers.google_maps {
            require_credential("providers.google_maps.api_key", Some(&google.api_key))?;
        }
        if let Some(token) = self.providers.arcgis.as_ref().and_then(|a| a.token.as_ref()) {
            require_credential("providers.arcgis.token", Some(token))?;
        }
        if let Some(mapquest) = &self.providers.mapquest {
            require_credential("providers.mapquest.api_key", Some(&mapquest.api_key))?;
        }

        if let Some(default) = &self.default_provider {
            let configured = self.providers.configured_names();
            if !configured.contains(&default.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "default_provider '{default}' is not configured (configured: {})",
                    configured.join(", ")
                )));
            }
        }

        Ok(())
    }
}

fn require_credential(key: &str, value: Option<&String>) -> Result<(), ConfigError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(()),
        _ => Err(ConfigError::Invalid(format!("{key} must not be empty"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX).source(Some(config::Map::new()))
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn app_config_default() {
        let config = AppConfig::default();
        assert!(config.default_provider.is_none());
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.providers.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_defaults_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        std::fs::write(&path, "").unwrap();

        let config = AppConfig::load_with_env(Some(&path), no_env()).unwrap();
        assert_eq!(config.http.connect_timeout_secs, 10);
        assert_eq!(config.logging.filter, "warn");
        assert!(config.providers.is_empty());
    }

    #[test]
    fn loads_toml_file() {
        let file = write_config(
            r#"
default_provider = "GoogleMapsProvider"

[logging]
format = "json"

[providers.google_maps]
api_key = "abc"

[providers.arcgis]
base_url = "http://localhost:9000/GeocodeServer"
"#,
        );

        let config = AppConfig::load_with_env(Some(file.path()), no_env()).unwrap();
        assert_eq!(config.default_provider.as_deref(), Some("GoogleMapsProvider"));
        assert_eq!(config.logging.format, LogFormat::Json);
        let google = config.providers.google_maps.as_ref().unwrap();
        assert_eq!(google.api_key, "abc");
        assert_eq!(google.base_url, "https://maps.googleapis.com");
        assert_eq!(
            config.providers.configured_names(),
            vec!["GoogleMapsProvider", "ArcgisProvider"]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config("[http]\ntimeout_secs = 5\n");
        let config = AppConfig::load_with_env(
            Some(file.path()),
            env(&[
                ("GEOCODER_HTTP__TIMEOUT_SECS", "12"),
                ("GEOCODER_PROVIDERS__MAPQUEST__API_KEY", "mq-key"),
            ]),
        )
        .unwrap();

        assert_eq!(config.http.timeout_secs, 12);
        assert_eq!(
            config.providers.mapquest.map(|m| m.api_key),
            Some("mq-key".to_string())
        );
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let result = AppConfig::load_with_env(Some(Path::new("/nonexistent/geocoder.toml")), no_env());
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn serialized_config_loads_back() {
        let mut original = AppConfig::default();
        original.providers.mapquest = Some(MapQuestConfig::new("key"));
        original.default_provider = Some("MapQuestProvider".to_string());
        let file = write_config(&toml::to_string(&original).unwrap());

        let loaded = AppConfig::load_with_env(Some(file.path()), no_env()).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.http.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_empty_api_key() {
        let mut config = AppConfig::default();
        config.providers.google_maps = Some(GoogleMapsConfig::new("  "));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("providers.google_maps.api_key"));
    }

    #[test]
    fn anonymous_arcgis_is_valid() {
        let mut config = AppConfig::default();
        config.providers.arcgis = Some(ArcgisConfig::default());
        assert!(config.validate().is_ok());

        config.providers.arcgis = Some(ArcgisConfig::default().with_token(""));
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unconfigured_default_provider() {
        let mut config = AppConfig::default();
        config.providers.arcgis = Some(ArcgisConfig::default());
        config.default_provider = Some("GoogleMapsProvider".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("GoogleMapsProvider"));
    }

    #[test]
    fn reference_data_defaults_to_embedded() {
        let data = ReferenceDataConfig::default().load().unwrap();
        assert!(data.country_count() > 200);
    }
}
