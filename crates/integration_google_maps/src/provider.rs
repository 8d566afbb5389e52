//! Google Maps provider assembly

use std::fmt;
use std::sync::Arc;

use application::{
    GeocodeCapability, HttpCommand, HttpTransportPort, LocationCommand, NamedProvider,
    PipelineContext, PlaceDetailsCapability, Provider, ReverseCapability, SuggestCapability,
    SuggestionCommand,
};
use domain::{GeocodeQuery, PlaceDetailsQuery, ReverseQuery, SuggestQuery};
use tracing::debug;

use crate::config::GoogleMapsConfig;
use crate::{request, response};

pub(crate) const PROVIDER_NAME: &str = "GoogleMapsProvider";

/// Google Maps provider supporting geocode, reverse, suggest and place details
pub struct GoogleMapsProvider {
    geocode: LocationCommand<GeocodeQuery>,
    reverse: LocationCommand<ReverseQuery>,
    suggest: SuggestionCommand<SuggestQuery>,
    place_details: LocationCommand<PlaceDetailsQuery>,
}

impl GoogleMapsProvider {
    pub fn new(
        config: &GoogleMapsConfig,
        transport: Arc<dyn HttpTransportPort>,
        context: PipelineContext,
    ) -> Self {
        let config = Arc::new(config.clone());
        debug!(base_url = %config.base_url, "Assembling Google Maps provider");

        let geocode = {
            let config = Arc::clone(&config);
            HttpCommand::new(
                "GoogleMapsGeocode",
                Arc::clone(&transport),
                move |query: &GeocodeQuery| Ok(request::geocode(&config, query)),
                response::parse_locations,
            )
        };
        let reverse = {
            let config = Arc::clone(&config);
            HttpCommand::new(
                "GoogleMapsReverse",
                Arc::clone(&transport),
                move |query: &ReverseQuery| Ok(request::reverse(&config, query)),
                response::parse_locations,
            )
        };
        let suggest = {
            let config = Arc::clone(&config);
            HttpCommand::new(
                "GoogleMapsSuggest",
                Arc::clone(&transport),
                move |query: &SuggestQuery| Ok(request::suggest(&config, query)),
                response::parse_suggestions,
            )
        };
        let place_details = HttpCommand::new(
            "GoogleMapsPlaceDetails",
            transport,
            move |query: &PlaceDetailsQuery| Ok(request::place_details(&config, query)),
            response::parse_place_details,
        );

        Self {
            geocode: LocationCommand::new(geocode, context.clone()),
            reverse: LocationCommand::new(reverse, context.clone()),
            suggest: SuggestionCommand::new(suggest, context.clone()),
            place_details: LocationCommand::new(place_details, context),
        }
    }
}

impl Provider for GoogleMapsProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn geocoder(&self) -> Option<&dyn GeocodeCapability> {
        Some(&self.geocode)
    }

    fn reverser(&self) -> Option<&dyn ReverseCapability> {
        Some(&self.reverse)
    }

    fn suggester(&self) -> Option<&dyn SuggestCapability> {
        Some(&self.suggest)
    }

    fn place_details_finder(&self) -> Option<&dyn PlaceDetailsCapability> {
        Some(&self.place_details)
    }
}

impl NamedProvider for GoogleMapsProvider {
    const NAME: &'static str = PROVIDER_NAME;
}

impl fmt::Debug for GoogleMapsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleMapsProvider").finish_non_exhaustive()
    }
}
