//! Location pipeline
//!
//! Wraps a provider command with the steps every location-returning operation
//! shares: validation, building, reference enrichment, accuracy filtering and
//! limiting. Results keep provider order throughout.

use std::fmt;

use async_trait::async_trait;
use domain::{
    Accuracy, GeocodeQuery, GeocoderError, Location, LocationBuilder, PlaceDetailsQuery, Query,
    ReverseQuery,
};
use serde_json::{Value, json};
use tracing::{debug, instrument};

use super::command::{Command, PipelineContext, apply_limit, validate_query};
use super::provider::{GeocodeCapability, PlaceDetailsCapability, ReverseCapability};
use crate::error::LookupError;
use crate::ports::{CountryQuery, StateQuery};

type BoxedLocationCommand<Q> = Box<dyn Command<Q, Output = LocationBuilder>>;

/// Validate → command → enrich → filter → limit
pub struct LocationCommand<Q: Query> {
    command: BoxedLocationCommand<Q>,
    context: PipelineContext,
}

impl<Q: Query> LocationCommand<Q> {
    pub fn new(
        command: impl Command<Q, Output = LocationBuilder> + 'static,
        context: PipelineContext,
    ) -> Self {
        Self {
            command: Box::new(command),
            context,
        }
    }

    /// Run the whole pipeline on caller-supplied plain data
    #[instrument(skip_all, fields(query = std::any::type_name::<Q>()))]
    pub async fn execute(&self, raw: &Value) -> Result<Vec<Location>, GeocoderError> {
        let query: Q = validate_query(raw, self.context.logger.as_ref())?;

        let locations = self
            .command
            .execute(&query)
            .await?
            .into_iter()
            .map(LocationBuilder::build)
            .collect::<Result<Vec<_>, _>>()?;

        let mut enriched = Vec::with_capacity(locations.len());
        for location in locations {
            enriched.push(self.enrich(location).await);
        }

        let filtered = filter_by_accuracy(enriched, query.accuracy())?;
        let limited = apply_limit(filtered, query.limit());
        debug!(results = limited.len(), "Location pipeline finished");
        Ok(limited)
    }

    async fn enrich(&self, mut location: Location) -> Location {
        if let Err(err) = self.enrich_country(&mut location).await {
            self.report(&err, &location);
        }
        if let Err(err) = self.enrich_state(&mut location).await {
            self.report(&err, &location);
        }
        location
    }

    async fn enrich_country(&self, location: &mut Location) -> Result<(), LookupError> {
        let has_any = location.country.is_some() || location.country_code.is_some();
        if !has_any || location.has_canonical_country() {
            return Ok(());
        }

        let query = CountryQuery {
            code: location.country_code.clone(),
            name: location.country.clone(),
        };
        if let Some(record) = self.context.countries.find_country(&query).await? {
            location.country = Some(record.name);
            location.country_code = Some(record.code);
        }
        Ok(())
    }

    async fn enrich_state(&self, location: &mut Location) -> Result<(), LookupError> {
        let Some(country_code) = location.country_code.clone() else {
            return Ok(());
        };
        if location.state.is_none() && location.state_code.is_none() {
            return Ok(());
        }

        let query = StateQuery {
            country_code,
            code: location.state_code.clone(),
            name: location.state.clone(),
        };
        if let Some(record) = self.context.states.find_state(&query).await? {
            location.state = Some(record.name);
            location.state_code = Some(record.code);
        }
        Ok(())
    }

    fn report(&self, err: &LookupError, location: &Location) {
        self.context
            .logger
            .error(err, &json!({ "location": location }));
    }
}

impl<Q: Query> fmt::Debug for LocationCommand<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationCommand")
            .field("query", &std::any::type_name::<Q>())
            .finish_non_exhaustive()
    }
}

/// Keep the locations that satisfy the requested accuracy level
///
/// Each level tests exactly its own fields; a city-level result is not kept
/// for `HOUSE_NUMBER`, and a house-number result without a city is not kept
/// for `CITY`.
pub fn filter_by_accuracy(
    locations: Vec<Location>,
    accuracy: Option<&Accuracy>,
) -> Result<Vec<Location>, GeocoderError> {
    let Some(accuracy) = accuracy else {
        return Ok(locations);
    };

    let keep: fn(&Location) -> bool = match accuracy {
        Accuracy::HouseNumber => |l| l.house_number.is_some(),
        Accuracy::StreetName => |l| l.street_name.is_some(),
        Accuracy::City => |l| l.city.is_some(),
        Accuracy::State => |l| l.state.is_some() || l.state_code.is_some(),
        Accuracy::Country => |l| l.country.is_some() || l.country_code.is_some(),
        Accuracy::Unrecognized(value) => {
            return Err(GeocoderError::UnsupportedAccuracy(value.clone()));
        },
    };

    Ok(locations.into_iter().filter(keep).collect())
}

#[async_trait]
impl GeocodeCapability for LocationCommand<GeocodeQuery> {
    async fn geocode(&self, query: &Value) -> Result<Vec<Location>, GeocoderError> {
        self.execute(query).await
    }
}

#[async_trait]
impl ReverseCapability for LocationCommand<ReverseQuery> {
    async fn reverse(&self, query: &Value) -> Result<Vec<Location>, GeocoderError> {
        self.execute(query).await
    }
}

#[async_trait]
impl PlaceDetailsCapability for LocationCommand<PlaceDetailsQuery> {
    async fn place_details(&self, query: &Value) -> Result<Location, GeocoderError> {
        self.execute(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| GeocoderError::invalid_response("place details returned no result"))
    }
}
