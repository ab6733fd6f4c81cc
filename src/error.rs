//! Configuration error types.
//!
//! The simulation itself is total over well-formed floats and never fails;
//! only loading and validating a [`Tuning`](crate::sim::Tuning) can.

use std::fmt;

/// Reasons a tuning document is rejected.
#[derive(Debug)]
pub enum TuningError {
    /// The JSON document could not be parsed into a tuning.
    Parse(serde_json::Error),

    /// A physics constant is outside its usable range.
    UnsafeConstant {
        /// Name of the field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the accepted range.
        safe_range: &'static str,
    },

    /// A slow-motion band is empty, reversed, or does not start where the
    /// previous one ended.
    MalformedBand {
        /// Position of the band in the table.
        index: usize,
        start: f64,
        end: f64,
    },

    /// A slow-motion band would scale time outside (0, 1].
    BandFactor {
        index: usize,
        factor: f64,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "invalid tuning document: {}", e),
            TuningError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "tuning '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            TuningError::MalformedBand { index, start, end } => write!(
                f,
                "slow-motion band {} [{}, {}] is empty or not contiguous",
                index, start, end
            ),
            TuningError::BandFactor { index, factor } => write!(
                f,
                "slow-motion band {} scales time by {}, expected (0, 1]",
                index, factor
            ),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Convenience alias: a `Result` using `TuningError` as the error type.
pub type TuningResult<T> = Result<T, TuningError>;

/// Returns an error unless `value` is finite and strictly positive.
pub fn require_positive(name: &'static str, value: f64) -> TuningResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn require_non_negative(name: &'static str, value: f64) -> TuningResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert!(require_positive("gravity", 1.0).is_ok());
        assert!(require_positive("gravity", 0.0).is_err());
        assert!(require_positive("gravity", f64::NAN).is_err());
        assert!(require_positive("gravity", f64::INFINITY).is_err());
    }

    #[test]
    fn test_display_names_field() {
        let err = require_non_negative("mid_screen_offset", -3.0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("mid_screen_offset"));
        assert!(msg.contains("-3"));
    }
}
