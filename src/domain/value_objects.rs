//! Value Objects - Immutable domain primitives
//!
//! Metric kinds and the textual value formats each kind accepts.

use crate::domain::errors::ParseError;

/// Kind of metric named in an update request.
///
/// Gauges and counters live in separate namespaces: the same name may hold
/// an unrelated value under each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// Point-in-time value; each update overwrites the previous one.
    Gauge,
    /// Cumulative value; each update adds a delta.
    Counter,
}

impl MetricKind {
    /// Parse a kind from its path segment.
    ///
    /// Matching is exact and case-sensitive.
    ///
    /// # Examples
    /// ```
    /// use metrics_ingest::domain::value_objects::MetricKind;
    ///
    /// assert_eq!(MetricKind::parse("gauge"), Some(MetricKind::Gauge));
    /// assert_eq!(MetricKind::parse("Gauge"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "gauge" => Some(Self::Gauge),
            "counter" => Some(Self::Counter),
            _ => None,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gauge => "gauge",
            Self::Counter => "counter",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a gauge value as a 64-bit float.
///
/// Decimal notation with optional sign, fraction and exponent is accepted,
/// as are the literals `inf`, `infinity` and `nan` in any case. A finite
/// literal too large for f64 is rejected rather than rounded to infinity.
pub fn parse_gauge(raw: &str) -> Result<f64, ParseError> {
    let value: f64 = raw.parse().map_err(|source| ParseError::Gauge {
        raw: raw.to_string(),
        source,
    })?;

    if value.is_infinite() && !is_infinity_literal(raw) {
        return Err(ParseError::GaugeOutOfRange {
            raw: raw.to_string(),
        });
    }

    Ok(value)
}

/// Parse a counter delta as a base-10 signed 64-bit integer.
pub fn parse_counter(raw: &str) -> Result<i64, ParseError> {
    raw.parse().map_err(|source| ParseError::Counter {
        raw: raw.to_string(),
        source,
    })
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

#[cfg(test)]
#[allow(clippy::approx_constant)]
mod tests {
    use super::*;

    // ===== MetricKind Tests =====

    #[test]
    fn test_kind_parse() {
        let tests = vec![
            ("gauge", Some(MetricKind::Gauge)),
            ("counter", Some(MetricKind::Counter)),
            ("GAUGE", None),
            ("Counter", None),
            ("histogram", None),
            ("", None),
        ];

        for (input, expected) in tests {
            assert_eq!(MetricKind::parse(input), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(MetricKind::Gauge.to_string(), "gauge");
        assert_eq!(format!("{}", MetricKind::Counter), "counter");
    }

    #[test]
    fn test_kind_as_str_parses_back() {
        for kind in [MetricKind::Gauge, MetricKind::Counter] {
            assert_eq!(MetricKind::parse(kind.as_str()), Some(kind));
        }
    }

    // ===== Gauge Parsing Tests =====

    #[test]
    fn test_parse_gauge_decimal() {
        assert_eq!(parse_gauge("3.14").unwrap(), 3.14);
        assert_eq!(parse_gauge("2.0").unwrap(), 2.0);
        assert_eq!(parse_gauge("-0.5").unwrap(), -0.5);
        assert_eq!(parse_gauge("+7").unwrap(), 7.0);
        assert_eq!(parse_gauge(".25").unwrap(), 0.25);
        assert_eq!(parse_gauge("1e3").unwrap(), 1000.0);
        assert_eq!(parse_gauge("1.5E-2").unwrap(), 0.015);
    }

    #[test]
    fn test_parse_gauge_special_literals() {
        assert_eq!(parse_gauge("inf").unwrap(), f64::INFINITY);
        assert_eq!(parse_gauge("-Infinity").unwrap(), f64::NEG_INFINITY);
        assert!(parse_gauge("NaN").unwrap().is_nan());
    }

    #[test]
    fn test_parse_gauge_out_of_range() {
        let err = parse_gauge("1e400").unwrap_err();
        assert!(matches!(err, ParseError::GaugeOutOfRange { .. }));
        assert!(matches!(
            parse_gauge("-1e400"),
            Err(ParseError::GaugeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_gauge_invalid() {
        for raw in ["", "abc", " 1.0", "1.0 ", "1,5", "0x10", "1.2.3"] {
            let err = parse_gauge(raw).unwrap_err();
            assert!(matches!(err, ParseError::Gauge { .. }), "input: {:?}", raw);
            assert_eq!(err.raw(), raw);
        }
    }

    // ===== Counter Parsing Tests =====

    #[test]
    fn test_parse_counter_valid() {
        assert_eq!(parse_counter("10").unwrap(), 10);
        assert_eq!(parse_counter("-5").unwrap(), -5);
        assert_eq!(parse_counter("+3").unwrap(), 3);
        assert_eq!(parse_counter("0").unwrap(), 0);
        assert_eq!(parse_counter("9223372036854775807").unwrap(), i64::MAX);
        assert_eq!(parse_counter("-9223372036854775808").unwrap(), i64::MIN);
    }

    #[test]
    fn test_parse_counter_invalid() {
        for raw in ["", "abc", "1.5", "1e3", " 1", "9223372036854775808", "--1"] {
            let err = parse_counter(raw).unwrap_err();
            assert!(matches!(err, ParseError::Counter { .. }), "input: {:?}", raw);
        }
    }
}
