//! Logging setup

mod subscriber;

pub use subscriber::{LogFormat, LoggingConfig, TelemetryError, init_tracing};
