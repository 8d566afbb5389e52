//! Domain layer for the geocoder
//!
//! Provider-agnostic queries, results, the accuracy ladder and the error
//! taxonomy shared by every other crate. No I/O happens here.

pub mod entities;
pub mod errors;
pub mod queries;
pub mod value_objects;

pub use entities::*;
pub use errors::{FieldViolation, GeocoderError, ValidationError};
pub use queries::{
    GeocodeQuery, PlaceDetailsQuery, Query, ReverseQuery, SuggestQuery, parse_query,
};
pub use value_objects::*;
