//! Geocoder CLI
//!
//! Argument parsing and provider wiring for the `geocoder-cli` binary.

pub mod cli;
pub mod wiring;

pub use cli::{Cli, Commands};
pub use wiring::build_geocoder;
