//! Domain Errors
//!
//! Failures raised while applying a metric update.

use std::num::{ParseFloatError, ParseIntError};

/// A raw metric value did not parse for its kind.
///
/// The store is never modified when this is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid gauge value {raw:?}: {source}")]
    Gauge {
        raw: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("gauge value {raw:?} is out of range")]
    GaugeOutOfRange { raw: String },

    #[error("invalid counter value {raw:?}: {source}")]
    Counter {
        raw: String,
        #[source]
        source: ParseIntError,
    },
}

impl ParseError {
    /// The raw input that failed to parse.
    pub fn raw(&self) -> &str {
        match self {
            Self::Gauge { raw, .. } | Self::GaugeOutOfRange { raw } | Self::Counter { raw, .. } => {
                raw
            }
        }
    }
}

/// Failure of the update use case.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpdateError {
    #[error("Invalid metric type {0:?}")]
    UnknownKind(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_raw() {
        let err = ParseError::GaugeOutOfRange {
            raw: "1e400".to_string(),
        };
        assert_eq!(err.raw(), "1e400");

        let source = "abc".parse::<i64>().unwrap_err();
        let err = ParseError::Counter {
            raw: "abc".to_string(),
            source,
        };
        assert_eq!(err.raw(), "abc");
    }

    #[test]
    fn test_parse_error_display() {
        let source = "x".parse::<f64>().unwrap_err();
        let err = ParseError::Gauge {
            raw: "x".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("invalid gauge value \"x\""));
    }

    #[test]
    fn test_update_error_from_parse_error() {
        let err: UpdateError = ParseError::GaugeOutOfRange {
            raw: "-1e999".to_string(),
        }
        .into();
        assert!(matches!(err, UpdateError::Parse(_)));
        assert_eq!(err.to_string(), "gauge value \"-1e999\" is out of range");
    }

    #[test]
    fn test_unknown_kind_display() {
        let err = UpdateError::UnknownKind("histogram".to_string());
        assert_eq!(err.to_string(), "Invalid metric type \"histogram\"");
    }
}
