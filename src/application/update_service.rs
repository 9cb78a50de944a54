//! Update Service - Main application use case
//!
//! Dispatches a single metric update onto the metrics store.

use crate::domain::errors::UpdateError;
use crate::domain::ports::MetricsStore;
use crate::domain::value_objects::MetricKind;
use std::sync::Arc;

/// Update service - applies one `(kind, name, value)` update.
///
/// The inbound adapter is responsible for extracting the triple and for
/// rejecting empty names; this service only resolves the kind and forwards
/// the raw value to the matching store operation.
pub struct UpdateService {
    store: Arc<dyn MetricsStore>,
}

impl UpdateService {
    /// Create a new update service.
    pub fn new(store: Arc<dyn MetricsStore>) -> Self {
        Self { store }
    }

    /// Apply an update and return the kind that was written.
    ///
    /// An unknown kind is rejected before the store is touched.
    pub fn apply(&self, kind: &str, name: &str, value: &str) -> Result<MetricKind, UpdateError> {
        let kind = MetricKind::parse(kind)
            .ok_or_else(|| UpdateError::UnknownKind(kind.to_string()))?;

        match kind {
            MetricKind::Gauge => self.store.update_gauge(name, value)?,
            MetricKind::Counter => self.store.update_counter(name, value)?,
        }

        tracing::debug!(%kind, name, value, "metric updated");
        Ok(kind)
    }
}
