//! metrics-ingest Library
//!
//! This module exposes the metrics-ingest components for use in integration
//! tests and as a library.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use adapters::inbound::UpdateServer;
pub use adapters::outbound::DashMapMetricsStore;
pub use application::UpdateService;
pub use config::load_config;
pub use domain::ports::MetricsStore;
pub use domain::value_objects::MetricKind;
pub use domain::{ParseError, UpdateError};
