//! DashMap Metrics Store
//!
//! Implements MetricsStore using DashMap for lock-free concurrent access.

use crate::domain::errors::ParseError;
use crate::domain::ports::MetricsStore;
use crate::domain::value_objects::{parse_counter, parse_gauge};
use dashmap::DashMap;

/// DashMap-backed metrics store.
///
/// Gauges and counters are kept in two independent maps. Entries are never
/// removed. A counter update holds the entry's shard lock for the whole
/// read-add-write, so concurrent deltas to the same name are never lost.
pub struct DashMapMetricsStore {
    gauges: DashMap<String, f64>,
    counters: DashMap<String, i64>,
}

impl DashMapMetricsStore {
    /// Create an empty metrics store.
    pub fn new() -> Self {
        Self {
            gauges: DashMap::new(),
            counters: DashMap::new(),
        }
    }

    /// Current value of a gauge.
    pub fn gauge(&self, name: &str) -> Option<f64> {
        self.gauges.get(name).map(|v| *v)
    }

    /// Current value of a counter.
    pub fn counter(&self, name: &str) -> Option<i64> {
        self.counters.get(name).map(|v| *v)
    }

    /// Number of distinct gauge names.
    pub fn gauge_count(&self) -> usize {
        self.gauges.len()
    }

    /// Number of distinct counter names.
    pub fn counter_count(&self) -> usize {
        self.counters.len()
    }
}

impl Default for DashMapMetricsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsStore for DashMapMetricsStore {
    fn update_gauge(&self, name: &str, raw_value: &str) -> Result<(), ParseError> {
        let value = parse_gauge(raw_value)?;
        self.gauges.insert(name.to_string(), value);
        Ok(())
    }

    fn update_counter(&self, name: &str, raw_value: &str) -> Result<(), ParseError> {
        let delta = parse_counter(raw_value)?;
        let mut total = self.counters.entry(name.to_string()).or_insert(0);
        // i64 overflow wraps
        *total = total.wrapping_add(delta);
        Ok(())
    }
}
