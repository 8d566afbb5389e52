//! Assembles the geocoder from configuration

use std::sync::Arc;

use anyhow::Context;
use application::{Geocoder, HttpTransportPort, PipelineContext};
use infrastructure::{AppConfig, ReqwestTransport, TracingLogger};
use integration_arcgis::ArcgisProvider;
use integration_google_maps::GoogleMapsProvider;
use integration_mapquest::MapQuestProvider;
use tracing::info;

/// Register every configured provider over one shared transport and
/// reference dataset
pub fn build_geocoder(config: &AppConfig) -> anyhow::Result<Geocoder> {
    let transport: Arc<dyn HttpTransportPort> =
        Arc::new(ReqwestTransport::new(&config.http).context("failed to create HTTP transport")?);
    let reference = Arc::new(
        config
            .reference_data
            .load()
            .context("failed to load reference data")?,
    );
    let context = PipelineContext::default()
        .with_reference_data(reference.clone(), reference)
        .with_logger(Arc::new(TracingLogger));

    let providers = &config.providers;
    let mut builder = Geocoder::builder();
    if let Some(google) = &providers.google_maps {
        builder = builder.provider(GoogleMapsProvider::new(
            google,
            Arc::clone(&transport),
            context.clone(),
        ));
    }
    if let Some(arcgis) = &providers.arcgis {
        builder = builder.provider(ArcgisProvider::new(
            arcgis,
            Arc::clone(&transport),
            context.clone(),
        ));
    }
    if let Some(mapquest) = &providers.mapquest {
        builder = builder.provider(MapQuestProvider::new(mapquest, transport, context));
    }
    if let Some(default) = &config.default_provider {
        builder = builder.default_provider(default.clone());
    }

    let geocoder = builder.build().context("invalid provider setup")?;
    info!(providers = ?geocoder.provider_names(), "Geocoder ready");
    Ok(geocoder)
}
