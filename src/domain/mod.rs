//! Domain layer: metric kinds, value parsing and the store port.

pub mod errors;
pub mod ports;
pub mod value_objects;

pub use errors::{ParseError, UpdateError};
pub use value_objects::MetricKind;
