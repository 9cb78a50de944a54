//! Metrics Store Port
//!
//! Defines the interface for recording metric updates.

use crate::domain::errors::ParseError;

/// Store for gauge and counter metrics.
///
/// This is an outbound port. Both operations take the raw textual value from
/// the request and parse it themselves, so a failed parse leaves the store
/// untouched.
pub trait MetricsStore: Send + Sync {
    /// Parse `raw_value` as a float and overwrite the gauge `name`.
    fn update_gauge(&self, name: &str, raw_value: &str) -> Result<(), ParseError>;

    /// Parse `raw_value` as a signed integer and add it to the counter `name`.
    ///
    /// An absent counter starts at zero.
    fn update_counter(&self, name: &str, raw_value: &str) -> Result<(), ParseError>;
}
