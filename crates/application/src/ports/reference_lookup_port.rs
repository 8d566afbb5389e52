//! Reference data lookup ports
//!
//! Country and state lookups used to complete partially known addresses.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Country lookup criteria, matched by code (alpha-2 or alpha-3) and/or name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryQuery {
    pub code: Option<String>,
    pub name: Option<String>,
}

/// Canonical country record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// ISO 3166-1 alpha-2 code
    pub code: String,
    /// ISO 3166-1 alpha-3 code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code3: Option<String>,
    pub name: String,
}

/// State lookup criteria, scoped to one country
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateQuery {
    pub country_code: String,
    pub code: Option<String>,
    pub name: Option<String>,
}

/// Canonical first-level subdivision record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub code: String,
    pub name: String,
}

/// Port for country reference lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CountryLookupPort: Send + Sync {
    /// Find the country matching the query, `None` on a miss
    async fn find_country(&self, query: &CountryQuery)
    -> Result<Option<CountryRecord>, LookupError>;
}

/// Port for state reference lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StateLookupPort: Send + Sync {
    /// Find the state matching the query, `None` on a miss
    async fn find_state(&self, query: &StateQuery) -> Result<Option<StateRecord>, LookupError>;
}

/// Lookup that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReferenceData;

#[async_trait]
impl CountryLookupPort for NoReferenceData {
    async fn find_country(
        &self,
        _query: &CountryQuery,
    ) -> Result<Option<CountryRecord>, LookupError> {
        Ok(None)
    }
}

#[async_trait]
impl StateLookupPort for NoReferenceData {
    async fn find_state(&self, _query: &StateQuery) -> Result<Option<StateRecord>, LookupError> {
        Ok(None)
    }
}
