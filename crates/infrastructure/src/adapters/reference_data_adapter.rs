//! In-memory reference data - Implements the country and state lookup ports
//!
//! Backed by a JSON dataset, either the one embedded in the crate or a file
//! named in configuration. Codes match case-insensitively, names also ignore
//! accents and surrounding whitespace.

use std::collections::HashMap;
use std::path::Path;

use application::{
    CountryLookupPort, CountryQuery, CountryRecord, LookupError, StateLookupPort, StateQuery,
    StateRecord,
};
use async_trait::async_trait;
use deunicode::deunicode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

const EMBEDDED_DATASET: &str = include_str!("../../data/countries.json");

/// Errors raised while loading a reference dataset
#[derive(Debug, Error)]
pub enum ReferenceDataError {
    /// The dataset file could not be read
    #[error("Failed to read reference data from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not valid JSON of the expected shape
    #[error("Invalid reference data: {0}")]
    Parse(#[from] serde_json::Error),

    /// The dataset parsed but is inconsistent
    #[error("Invalid reference data: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
struct Dataset {
    countries: Vec<CountryRecord>,
    #[serde(default)]
    states: HashMap<String, Vec<StateRecord>>,
}

/// Country and state reference data held in memory
#[derive(Debug, Clone)]
pub struct InMemoryReferenceData {
    countries: Vec<CountryRecord>,
    /// Folded alpha-2/alpha-3 code or name -> index into `countries`
    country_index: HashMap<String, usize>,
    /// Upper-case alpha-2 country code -> subdivisions
    states: HashMap<String, Vec<StateRecord>>,
}

impl InMemoryReferenceData {
    /// Load the dataset shipped with the crate
    pub fn embedded() -> Result<Self, ReferenceDataError> {
        Self::from_json_str(EMBEDDED_DATASET)
    }

    /// Load a dataset from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ReferenceDataError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ReferenceDataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Load a dataset from a JSON document
    pub fn from_json_str(raw: &str) -> Result<Self, ReferenceDataError> {
        let dataset: Dataset = serde_json::from_str(raw)?;
        Self::from_records(dataset.countries, dataset.states)
    }

    /// Build from already parsed records
    pub fn from_records(
        countries: Vec<CountryRecord>,
        states: HashMap<String, Vec<StateRecord>>,
    ) -> Result<Self, ReferenceDataError> {
        let mut country_index = HashMap::with_capacity(countries.len() * 3);
        for (position, country) in countries.iter().enumerate() {
            if country.code.len() != 2 {
                return Err(ReferenceDataError::Invalid(format!(
                    "country code '{}' is not alpha-2",
                    country.code
                )));
            }
            country_index.insert(fold(&country.code), position);
            if let Some(code3) = &country.code3 {
                country_index.insert(fold(code3), position);
            }
            country_index.entry(fold(&country.name)).or_insert(position);
        }

        let states = states
            .into_iter()
            .map(|(code, records)| (code.to_ascii_uppercase(), records))
            .collect();

        debug!(countries = countries.len(), "Reference data loaded");
        Ok(Self {
            countries,
            country_index,
            states,
        })
    }

    /// Number of known countries
    #[must_use]
    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    fn country(&self, key: &str) -> Option<&CountryRecord> {
        self.country_index
            .get(&fold(key))
            .and_then(|&position| self.countries.get(position))
    }

    /// Resolve a code of either length to the alpha-2 key used for states
    fn alpha2(&self, country_code: &str) -> Option<String> {
        let folded = fold(country_code);
        if folded.len() == 2 {
            return Some(folded.to_ascii_uppercase());
        }
        self.country(country_code).map(|c| c.code.clone())
    }
}

/// Case, accent and whitespace insensitive key
fn fold(value: &str) -> String {
    deunicode(value.trim()).to_lowercase()
}

#[async_trait]
impl CountryLookupPort for InMemoryReferenceData {
    #[instrument(skip(self))]
    async fn find_country(
        &self,
        query: &CountryQuery,
    ) -> Result<Option<CountryRecord>, LookupError> {
        let by_code = query.code.as_deref().and_then(|code| self.country(code));
        let found = by_code.or_else(|| query.name.as_deref().and_then(|name| self.country(name)));
        Ok(found.cloned())
    }
}

#[async_trait]
impl StateLookupPort for InMemoryReferenceData {
    #[instrument(skip(self))]
    async fn find_state(&self, query: &StateQuery) -> Result<Option<StateRecord>, LookupError> {
        let Some(states) = self
            .alpha2(&query.country_code)
            .and_then(|code| self.states.get(&code))
        else {
            return Ok(None);
        };

        let code = query.code.as_deref().map(fold);
        let name = query.name.as_deref().map(fold);
        let found = states
            .iter()
            .find(|state| code.as_deref() == Some(fold(&state.code).as_str()))
            .or_else(|| {
                states
                    .iter()
                    .find(|state| name.as_deref() == Some(fold(&state.name).as_str()))
            });
        Ok(found.cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> InMemoryReferenceData {
        InMemoryReferenceData::embedded().unwrap()
    }

    fn country_by_code(code: &str) -> CountryQuery {
        CountryQuery {
            code: Some(code.to_string()),
            name: None,
        }
    }

    fn country_by_name(name: &str) -> CountryQuery {
        CountryQuery {
            code: None,
            name: Some(name.to_string()),
        }
    }

    fn state(country_code: &str, code: Option<&str>, name: Option<&str>) -> StateQuery {
        StateQuery {
            country_code: country_code.to_string(),
            code: code.map(str::to_string),
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn embedded_dataset_covers_iso_list() {
        assert_eq!(data().country_count(), 249);
    }

    #[tokio::test]
    async fn finds_country_by_alpha2_and_alpha3() {
        let data = data();
        let us = data.find_country(&country_by_code("US")).await.unwrap().unwrap();
        assert_eq!(us.name, "United States");
        assert_eq!(us.code3.as_deref(), Some("USA"));

        let usa = data.find_country(&country_by_code("usa")).await.unwrap().unwrap();
        assert_eq!(usa.code, "US");
    }

    #[tokio::test]
    async fn finds_country_by_name_ignoring_case_and_accents() {
        let data = data();
        let germany = data
            .find_country(&country_by_name("  germany "))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(germany.code, "DE");

        let reunion = data
            .find_country(&country_by_name("Reunion"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reunion.code, "RE");
    }

    #[tokio::test]
    async fn code_wins_over_name() {
        let query = CountryQuery {
            code: Some("FR".to_string()),
            name: Some("Germany".to_string()),
        };
        let found = data().find_country(&query).await.unwrap().unwrap();
        assert_eq!(found.code, "FR");
    }

    #[tokio::test]
    async fn unknown_country_is_a_miss() {
        let data = data();
        assert!(data.find_country(&country_by_code("ZZ")).await.unwrap().is_none());
        assert!(data.find_country(&CountryQuery::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn finds_state_by_code_and_by_name() {
        let data = data();
        let by_code = data
            .find_state(&state("US", Some("il"), None))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_code.name, "Illinois");

        let by_name = data
            .find_state(&state("US", None, Some("new york")))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_name.code, "NY");
    }

    #[tokio::test]
    async fn state_lookup_accepts_alpha3_country() {
        let found = data()
            .find_state(&state("USA", None, Some("Illinois")))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.code, "IL");
    }

    #[tokio::test]
    async fn german_state_names_fold_umlauts() {
        let found = data()
            .find_state(&state("DE", None, Some("Baden-Wurttemberg")))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.code, "BW");
    }

    #[tokio::test]
    async fn states_of_uncovered_country_miss() {
        let found = data()
            .find_state(&state("FR", Some("IDF"), None))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn rejects_non_alpha2_country_codes() {
        let raw = r#"{"countries": [{"code": "USA", "name": "United States"}]}"#;
        let err = InMemoryReferenceData::from_json_str(raw).unwrap_err();
        assert!(matches!(err, ReferenceDataError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = InMemoryReferenceData::from_json_str("{").unwrap_err();
        assert!(matches!(err, ReferenceDataError::Parse(_)));
    }

    #[test]
    fn loads_dataset_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.json");
        std::fs::write(
            &path,
            r#"{"countries": [{"code": "NL", "code3": "NLD", "name": "Netherlands"}],
                "states": {"nl": [{"code": "NH", "name": "Noord-Holland"}]}}"#,
        )
        .unwrap();

        let data = InMemoryReferenceData::from_json_file(&path).unwrap();
        assert_eq!(data.country_count(), 1);
        let found = tokio_test::block_on(data.find_state(&state("NLD", Some("NH"), None)))
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "Noord-Holland");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = InMemoryReferenceData::from_json_file("/nonexistent/reference.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/reference.json"));
    }
}
