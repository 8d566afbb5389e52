//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports: the `reqwest` transport, the in-memory
//! reference dataset and the `tracing` logger. Also owns configuration loading
//! and subscriber setup.

pub mod adapters;
pub mod config;
pub mod http;
pub mod telemetry;

pub use adapters::{InMemoryReferenceData, ReferenceDataError, TracingLogger};
pub use config::{AppConfig, ConfigError, ProvidersConfig, ReferenceDataConfig};
pub use http::{HttpClientConfig, ReqwestTransport};
pub use telemetry::{LogFormat, LoggingConfig, init_tracing};
