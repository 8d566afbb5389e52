//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod http_transport_port;
mod logger_port;
mod reference_lookup_port;

pub use http_transport_port::{HttpMethod, HttpRequest, HttpResponse, HttpTransportPort};
#[cfg(test)]
pub use http_transport_port::MockHttpTransportPort;
pub use logger_port::{GeocoderLogger, NullLogger};
pub use reference_lookup_port::{
    CountryLookupPort, CountryQuery, CountryRecord, NoReferenceData, StateLookupPort, StateQuery,
    StateRecord,
};
#[cfg(test)]
pub use reference_lookup_port::{MockCountryLookupPort, MockStateLookupPort};
