//! Logging port
//!
//! Services report swallowed and rejected errors through this port so the
//! caller decides where they end up.

use std::error::Error;

use serde_json::Value;

/// Sink for errors together with the data that caused them
pub trait GeocoderLogger: Send + Sync {
    /// Record an error with structured context
    fn error(&self, error: &dyn Error, context: &Value);
}

/// Logger that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl GeocoderLogger for NullLogger {
    fn error(&self, _error: &dyn Error, _context: &Value) {}
}
