//! Value Objects - Immutable, identity-less domain primitives

mod accuracy;
mod capability;
mod coordinates;

pub use accuracy::{Accuracy, slice_from};
pub use capability::Capability;
pub use coordinates::{Coordinates, InvalidCoordinates};
