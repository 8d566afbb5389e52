//! Provider dispatcher
//!
//! Holds the registered providers and routes each call to one of them.
//! Registration is fixed at construction; selecting a provider returns a
//! call-scoped handle and never changes the dispatcher.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use domain::{Capability, GeocoderError, Location, Suggestion};
use serde_json::Value;
use tracing::instrument;

use super::provider::{NamedProvider, Provider};

/// Entry point for geocoding calls
#[derive(Clone)]
pub struct Geocoder {
    providers: Vec<Arc<dyn Provider>>,
    default_provider: Option<String>,
}

/// Builder for [`Geocoder`]
#[derive(Default)]
pub struct GeocoderBuilder {
    providers: Vec<Arc<dyn Provider>>,
    default_provider: Option<String>,
}

impl GeocoderBuilder {
    /// Register a provider
    #[must_use]
    pub fn provider(mut self, provider: impl Provider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Provider used by calls that do not select one
    #[must_use]
    pub fn default_provider(mut self, name: impl Into<String>) -> Self {
        self.default_provider = Some(name.into());
        self
    }

    /// Finish the registration
    ///
    /// # Errors
    ///
    /// Returns `Configuration` when two providers share a name or the
    /// default provider is not registered.
    pub fn build(self) -> Result<Geocoder, GeocoderError> {
        let mut seen = HashSet::new();
        for provider in &self.providers {
            if !seen.insert(provider.name().to_string()) {
                return Err(GeocoderError::Configuration(format!(
                    "provider {} registered twice",
                    provider.name()
                )));
            }
        }

        if let Some(default) = &self.default_provider
            && !seen.contains(default)
        {
            return Err(GeocoderError::Configuration(format!(
                "default provider {default} is not registered"
            )));
        }

        Ok(Geocoder {
            providers: self.providers,
            default_provider: self.default_provider,
        })
    }
}

impl fmt::Debug for GeocoderBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocoderBuilder")
            .field("providers", &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>())
            .field("default_provider", &self.default_provider)
            .finish()
    }
}

impl Geocoder {
    #[must_use]
    pub fn builder() -> GeocoderBuilder {
        GeocoderBuilder::default()
    }

    /// Names of the registered providers, in registration order
    #[must_use]
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Handle bound to the provider type `P`
    pub fn using<P: NamedProvider>(&self) -> Result<ProviderHandle<'_>, GeocoderError> {
        self.using_name(P::NAME)
    }

    /// Handle bound to the provider with the given name
    pub fn using_name(&self, name: &str) -> Result<ProviderHandle<'_>, GeocoderError> {
        self.providers
            .iter()
            .find(|p| p.name() == name)
            .map(|p| ProviderHandle {
                provider: p.as_ref(),
            })
            .ok_or_else(|| GeocoderError::UnknownProvider(name.to_string()))
    }

    /// Handle bound to the default provider
    ///
    /// The configured default wins; otherwise the only registered provider.
    pub fn default_handle(&self) -> Result<ProviderHandle<'_>, GeocoderError> {
        if let Some(name) = &self.default_provider {
            return self.using_name(name);
        }
        match self.providers.as_slice() {
            [] => Err(GeocoderError::NoProvider),
            [only] => Ok(ProviderHandle {
                provider: only.as_ref(),
            }),
            many => Err(GeocoderError::AmbiguousProvider(
                many.iter().map(|p| p.name().to_string()).collect(),
            )),
        }
    }

    pub async fn geocode(&self, query: &Value) -> Result<Vec<Location>, GeocoderError> {
        self.default_handle()?.geocode(query).await
    }

    pub async fn reverse(&self, query: &Value) -> Result<Vec<Location>, GeocoderError> {
        self.default_handle()?.reverse(query).await
    }

    pub async fn suggest(&self, query: &Value) -> Result<Vec<Suggestion>, GeocoderError> {
        self.default_handle()?.suggest(query).await
    }

    pub async fn place_details(&self, query: &Value) -> Result<Location, GeocoderError> {
        self.default_handle()?.place_details(query).await
    }
}

impl fmt::Debug for Geocoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Geocoder")
            .field("providers", &self.provider_names())
            .field("default_provider", &self.default_provider)
            .finish()
    }
}

/// A provider selected for one call
#[derive(Clone, Copy)]
pub struct ProviderHandle<'a> {
    provider: &'a dyn Provider,
}

impl ProviderHandle<'_> {
    #[must_use]
    pub fn name(&self) -> &str {
        self.provider.name()
    }

    #[instrument(skip_all, fields(provider = self.name()))]
    pub async fn geocode(&self, query: &Value) -> Result<Vec<Location>, GeocoderError> {
        self.provider
            .geocoder()
            .ok_or_else(|| self.unsupported(Capability::Geocode))?
            .geocode(query)
            .await
    }

    #[instrument(skip_all, fields(provider = self.name()))]
    pub async fn reverse(&self, query: &Value) -> Result<Vec<Location>, GeocoderError> {
        self.provider
            .reverser()
            .ok_or_else(|| self.unsupported(Capability::Reverse))?
            .reverse(query)
            .await
    }

    #[instrument(skip_all, fields(provider = self.name()))]
    pub async fn suggest(&self, query: &Value) -> Result<Vec<Suggestion>, GeocoderError> {
        self.provider
            .suggester()
            .ok_or_else(|| self.unsupported(Capability::Suggest))?
            .suggest(query)
            .await
    }

    #[instrument(skip_all, fields(provider = self.name()))]
    pub async fn place_details(&self, query: &Value) -> Result<Location, GeocoderError> {
        self.provider
            .place_details_finder()
            .ok_or_else(|| self.unsupported(Capability::PlaceDetails))?
            .place_details(query)
            .await
    }

    fn unsupported(&self, capability: Capability) -> GeocoderError {
        GeocoderError::unsupported(self.name(), capability)
    }
}

impl fmt::Debug for ProviderHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("provider", &self.name())
            .finish()
    }
}
