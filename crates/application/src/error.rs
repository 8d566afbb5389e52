//! Application-level errors
//!
//! Failures reported by the outbound ports. Provider-facing failures are
//! translated into [`domain::GeocoderError`] by the services.

use thiserror::Error;

/// Errors reported by an HTTP transport adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be built or sent
    #[error("Request failed: {0}")]
    Request(String),

    /// The remote host could not be reached
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The request timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Errors reported by a reference-data lookup adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The lookup backend is not reachable
    #[error("Reference data unavailable: {0}")]
    Unavailable(String),

    /// The lookup backend returned data that could not be used
    #[error("Reference data is corrupt: {0}")]
    Corrupt(String),
}
