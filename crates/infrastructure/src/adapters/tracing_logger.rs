//! Tracing logger - Implements GeocoderLogger on top of `tracing`

use std::error::Error;

use application::GeocoderLogger;
use serde_json::Value;
use tracing::error;

/// Forwards pipeline errors to `tracing::error!` with the context as a field
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl GeocoderLogger for TracingLogger {
    fn error(&self, err: &dyn Error, context: &Value) {
        error!(error = %err, context = %context, "Geocoder error");
    }
}
