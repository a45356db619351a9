//! Error types for controller construction and strict numeric evaluation.
//!
//! Two categories exist:
//!
//! - [`ConfigError`]: raised while constructing a stage. Fatal to construction,
//!   never silently normalised.
//! - [`NumericError`]: raised by the strict evaluation path
//!   ([`Controller::try_update`](crate::Controller::try_update)) when a
//!   non-finite value reaches a stage boundary.
//!
//! Both are `Copy` and carry no heap data, so they can be produced from the
//! control-loop hot path.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Pipeline stage identifier, used in errors and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Stage {
    /// Forward transform
    Forward = 0,
    /// Contraction
    Contraction = 1,
    /// Inverse transform
    Inverse = 2,
    /// Gain-and-limit
    GainLimit = 3,
}

impl Stage {
    /// Short stable name for logs.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Forward => "forward",
            Stage::Contraction => "contraction",
            Stage::Inverse => "inverse",
            Stage::GainLimit => "gain_limit",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which saturation bound a configuration error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundSide {
    /// `u_min`
    Lower,
    /// `u_max`
    Upper,
}

impl fmt::Display for BoundSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundSide::Lower => f.write_str("u_min"),
            BoundSide::Upper => f.write_str("u_max"),
        }
    }
}

/// Configuration error, detected at stage construction.
///
/// # Examples
///
/// ```
/// use ect_core::{ConfigError, LinearGainLimit};
///
/// let err = LinearGainLimit::new(1.0, 2.0, -2.0).unwrap_err();
/// assert!(matches!(err, ConfigError::InvertedBounds { .. }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Gain is NaN or infinite
    #[error("{stage} gain must be finite, got {value}")]
    NonFiniteGain {
        /// Stage the gain belongs to
        stage: Stage,
        /// The rejected gain
        value: f64,
    },

    /// `u_min > u_max`
    #[error("Saturation bounds are inverted: u_min {u_min} > u_max {u_max}")]
    InvertedBounds {
        /// Lower bound
        u_min: f64,
        /// Upper bound
        u_max: f64,
    },

    /// A bound is NaN
    #[error("Saturation bound {side} is NaN")]
    NanBound {
        /// Which bound
        side: BoundSide,
    },
}

/// Numeric-domain error raised by strict evaluation.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum NumericError {
    /// A non-finite value arrived at a stage boundary
    #[error("Non-finite value {value} reached the {stage} stage")]
    NonFinite {
        /// Stage whose input was rejected
        stage: Stage,
        /// The rejected value
        value: f64,
    },
}

impl NumericError {
    /// Numeric error code for compact logging.
    ///
    /// Codes are `0x10 | stage`, so the rejecting stage can be recovered from
    /// the code alone.
    ///
    /// ```
    /// use ect_core::{NumericError, Stage};
    ///
    /// let err = NumericError::NonFinite { stage: Stage::GainLimit, value: f64::NAN };
    /// assert_eq!(err.code(), 0x13);
    /// ```
    pub fn code(self) -> u8 {
        match self {
            NumericError::NonFinite { stage, .. } => 0x10 | stage as u8,
        }
    }

    /// Stage that rejected the value.
    pub fn stage(self) -> Stage {
        match self {
            NumericError::NonFinite { stage, .. } => stage,
        }
    }
}

/// Top-level error wrapping every ECT error.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum EctError {
    /// Construction-time errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Strict-mode numeric errors
    #[error("Numeric error: {0}")]
    Numeric(#[from] NumericError),
}

impl EctError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            EctError::Config(_) => ErrorCategory::Config,
            EctError::Numeric(_) => ErrorCategory::Numeric,
        }
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Stage construction rejected its parameters
    Config = 0,
    /// A non-finite value reached a stage
    Numeric = 1,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Config => f.write_str("config"),
            ErrorCategory::Numeric => f.write_str("numeric"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NonFiniteGain {
            stage: Stage::Contraction,
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "contraction gain must be finite, got NaN");

        let err = ConfigError::InvertedBounds {
            u_min: 2.0,
            u_max: -2.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("u_min 2"));
        assert!(msg.contains("u_max -2"));

        let err = ConfigError::NanBound {
            side: BoundSide::Upper,
        };
        assert_eq!(err.to_string(), "Saturation bound u_max is NaN");
    }

    #[test]
    fn test_numeric_error_code_and_stage() {
        let err = NumericError::NonFinite {
            stage: Stage::Forward,
            value: f64::INFINITY,
        };
        assert_eq!(err.code(), 0x10);
        assert_eq!(err.stage(), Stage::Forward);
        assert!(err.to_string().contains("inf"));
    }

    #[test]
    fn test_ect_error_from_and_category() {
        let err: EctError = ConfigError::NanBound {
            side: BoundSide::Lower,
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(err.to_string().starts_with("Configuration error:"));

        let err: EctError = NumericError::NonFinite {
            stage: Stage::GainLimit,
            value: f64::NAN,
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Numeric);
    }

    #[test]
    fn test_stage_order() {
        let stages = [
            Stage::Forward,
            Stage::Contraction,
            Stage::Inverse,
            Stage::GainLimit,
        ];
        let codes: Vec<u8> = stages.iter().map(|s| *s as u8).collect();
        assert_eq!(codes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_errors_are_std_error_and_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<ConfigError>();
        assert_copy::<NumericError>();
        assert_copy::<EctError>();

        let err = EctError::from(NumericError::NonFinite {
            stage: Stage::Inverse,
            value: f64::NAN,
        });
        let _: &dyn std::error::Error = &err;
    }
}
