//! Serializable controller configuration.
//!
//! One tagged enum per stage. Each enum currently has a single variant; new
//! operator families add variants here without touching [`Controller`].
//!
//! Saturation bounds are written as numbers when finite and as the strings
//! `"inf"` / `"-inf"` otherwise, since JSON has no infinity literal. YAML also
//! accepts its native `.inf` / `-.inf`.
//!
//! ```
//! use ect_core::ControllerConfig;
//!
//! let json = r#"{
//!     "contraction": { "kind": "linear", "alpha": 0.8 },
//!     "gain_limit": { "kind": "linear", "gain": 1.0, "u_min": -1.0, "u_max": 1.0 }
//! }"#;
//! let config: ControllerConfig = serde_json::from_str(json)?;
//! let controller = config.build()?;
//! assert_eq!(controller.update(1e12), 1.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::controller::{Controller, LinearController};
use crate::error::ConfigError;
use crate::linear::{IdentityForward, IdentityInverse, LinearContraction, LinearGainLimit};
use crate::operator::GainLimit;
use crate::saturation::NonFinitePolicy;

/// Forward transform configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForwardConfig {
    /// `y = x`
    #[default]
    Identity,
}

impl ForwardConfig {
    /// Instantiate the stage.
    pub fn build(&self) -> IdentityForward {
        match self {
            ForwardConfig::Identity => IdentityForward,
        }
    }
}

/// Inverse transform configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InverseConfig {
    /// `y = x`
    #[default]
    Identity,
}

impl InverseConfig {
    /// Instantiate the stage.
    pub fn build(&self) -> IdentityInverse {
        match self {
            InverseConfig::Identity => IdentityInverse,
        }
    }
}

/// Contraction configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContractionConfig {
    /// `y = alpha·x`
    Linear {
        /// Contraction gain
        alpha: f64,
    },
}

impl ContractionConfig {
    /// Instantiate the stage.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NonFiniteGain`] for a non-finite `alpha`.
    pub fn build(&self) -> Result<LinearContraction, ConfigError> {
        match *self {
            ContractionConfig::Linear { alpha } => LinearContraction::new(alpha),
        }
    }
}

/// Bound encoding: finite values as numbers, infinities as `"inf"` / `"-inf"`.
mod bound_repr {
    use serde::de::{self, Deserializer};
    use serde::{Deserialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub(super) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("nan")
        } else if value.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|e| de::Error::custom(format!("invalid bound {text:?}: {e}"))),
        }
    }
}

/// Gain-and-limit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GainLimitConfig {
    /// `y = clamp(gain·x, u_min, u_max)`
    Linear {
        /// Gain `k`
        gain: f64,
        /// Lower actuator bound
        #[serde(with = "bound_repr")]
        u_min: f64,
        /// Upper actuator bound
        #[serde(with = "bound_repr")]
        u_max: f64,
        /// Mapping for NaN products
        #[serde(default)]
        non_finite: NonFinitePolicy,
    },
}

impl GainLimitConfig {
    /// Instantiate the stage.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] raised by [`LinearGainLimit::new`].
    pub fn build(&self) -> Result<LinearGainLimit, ConfigError> {
        match *self {
            GainLimitConfig::Linear {
                gain,
                u_min,
                u_max,
                non_finite,
            } => Ok(LinearGainLimit::new(gain, u_min, u_max)?.with_policy(non_finite)),
        }
    }
}

/// Complete controller configuration.
///
/// The default is the canonical linear configuration: identity transforms,
/// `alpha = 0.8`, unit gain, bounds `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControllerConfig {
    /// Forward transform
    #[serde(default)]
    pub forward: ForwardConfig,
    /// Contraction
    pub contraction: ContractionConfig,
    /// Inverse transform
    #[serde(default)]
    pub inverse: InverseConfig,
    /// Gain-and-limit
    pub gain_limit: GainLimitConfig,
}

impl ControllerConfig {
    /// Linear configuration with the given parameters and default policy.
    pub fn linear(alpha: f64, gain: f64, u_min: f64, u_max: f64) -> Self {
        Self {
            forward: ForwardConfig::Identity,
            contraction: ContractionConfig::Linear { alpha },
            inverse: InverseConfig::Identity,
            gain_limit: GainLimitConfig::Linear {
                gain,
                u_min,
                u_max,
                non_finite: NonFinitePolicy::default(),
            },
        }
    }

    /// Validate every stage and build the controller.
    ///
    /// # Errors
    ///
    /// The first [`ConfigError`] raised, in pipeline order.
    pub fn build(&self) -> Result<LinearController, ConfigError> {
        let forward = self.forward.build();
        let contraction = self.contraction.build()?;
        let inverse = self.inverse.build();
        let gain_limit = self.gain_limit.build()?;

        let bounds = gain_limit.bounds();
        debug!(
            alpha = contraction.alpha(),
            gain = gain_limit.gain(),
            u_min = bounds.min(),
            u_max = bounds.max(),
            policy = ?gain_limit.policy(),
            "Built linear ECT controller"
        );

        Ok(Controller::new(forward, contraction, inverse, gain_limit))
    }

    /// Check the configuration without keeping the controller.
    ///
    /// # Errors
    ///
    /// Same as [`ControllerConfig::build`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build().map(|_| ())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::linear(0.8, 1.0, -1.0, 1.0)
    }
}
