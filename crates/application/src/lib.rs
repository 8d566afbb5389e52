//! Application layer - Use cases and orchestration
//!
//! Ports for the transport, reference data and logging collaborators, the
//! command pipelines every provider is assembled from, and the dispatcher.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{LookupError, TransportError};
pub use ports::*;
pub use services::*;
