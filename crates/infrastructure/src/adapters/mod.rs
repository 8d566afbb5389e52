//! Adapters implementing application ports

mod reference_data_adapter;
mod tracing_logger;

pub use reference_data_adapter::{InMemoryReferenceData, ReferenceDataError};
pub use tracing_logger::TracingLogger;
