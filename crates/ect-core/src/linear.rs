//! Linear operator implementations
//!
//! The canonical variant of each capability:
//!
//! | Stage | Type | Mapping |
//! |-------|------|---------|
//! | forward | [`IdentityForward`] | `y = x` |
//! | contraction | [`LinearContraction`] | `y = α·x` |
//! | inverse | [`IdentityInverse`] | `y = x` |
//! | gain-and-limit | [`LinearGainLimit`] | `y = clamp(k·x, u_min, u_max)` |
//!
//! All parameters are validated at construction and immutable afterwards.

use crate::error::{ConfigError, Stage};
use crate::operator::{Contraction, ForwardTransform, GainLimit, InverseTransform};
use crate::saturation::{Bounds, NonFinitePolicy, Saturation, saturate};

fn check_gain(stage: Stage, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFiniteGain { stage, value })
    }
}

/// Identity forward transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IdentityForward;

impl ForwardTransform for IdentityForward {
    #[inline]
    fn apply(&self, delta: f64) -> f64 {
        delta
    }
}

/// Identity inverse transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IdentityInverse;

impl InverseTransform for IdentityInverse {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        x
    }
}

/// Scalar-gain contraction `y = α·x`.
///
/// With identity transforms and non-binding bounds, the closed loop
/// `delta ← delta - update(delta)` shrinks the error by
/// [`residual_ratio`](Self::residual_ratio) `= 1 - α` every cycle.
///
/// # Example
///
/// ```
/// use ect_core::{Contraction, LinearContraction};
///
/// let e = LinearContraction::new(0.8)?;
/// assert_eq!(e.apply(2.0), 1.6);
/// assert!((e.residual_ratio() - 0.2).abs() < 1e-12);
/// # Ok::<(), ect_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearContraction {
    alpha: f64,
}

impl LinearContraction {
    /// Create a contraction with gain `alpha`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NonFiniteGain`] if `alpha` is NaN or infinite.
    pub fn new(alpha: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            alpha: check_gain(Stage::Contraction, alpha)?,
        })
    }

    /// Contraction gain `α`.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Per-cycle error ratio `1 - α` of the linear closed loop.
    #[inline]
    pub fn residual_ratio(&self) -> f64 {
        1.0 - self.alpha
    }
}

impl Contraction for LinearContraction {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        self.alpha * x
    }
}

/// Scalar gain composed with actuator saturation.
///
/// Returns `u_min` when `k·x < u_min`, `u_max` when `k·x > u_max`, else
/// `k·x` unchanged. A NaN product is mapped through the stage's
/// [`NonFinitePolicy`] so the command is never NaN.
///
/// # RT Safety
///
/// - `Copy`, no heap data
/// - O(1): one multiply, at most three comparisons
///
/// # Example
///
/// ```
/// use ect_core::{GainLimit, LinearGainLimit};
///
/// let g = LinearGainLimit::new(1.0, -1.0, 1.0)?;
/// assert_eq!(g.apply(0.5), 0.5);
/// assert_eq!(g.apply(1e12), 1.0);
/// assert_eq!(g.apply(-1e12), -1.0);
/// assert_eq!(g.apply(f64::NAN), -1.0);
/// # Ok::<(), ect_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGainLimit {
    gain: f64,
    bounds: Bounds,
    policy: NonFinitePolicy,
}

impl LinearGainLimit {
    /// Create a gain-and-limit stage with the default non-finite policy.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NonFiniteGain`] if `gain` is NaN or infinite
    /// - [`ConfigError::NanBound`] / [`ConfigError::InvertedBounds`] for
    ///   invalid bounds
    pub fn new(gain: f64, u_min: f64, u_max: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            gain: check_gain(Stage::GainLimit, gain)?,
            bounds: Bounds::new(u_min, u_max)?,
            policy: NonFinitePolicy::default(),
        })
    }

    /// Create a stage whose bounds never bind for finite products.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NonFiniteGain`] if `gain` is NaN or infinite.
    pub fn unbounded(gain: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            gain: check_gain(Stage::GainLimit, gain)?,
            bounds: Bounds::UNBOUNDED,
            policy: NonFinitePolicy::default(),
        })
    }

    /// Replace the non-finite policy.
    #[must_use]
    pub fn with_policy(mut self, policy: NonFinitePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Gain `k`.
    #[inline]
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Non-finite policy.
    #[inline]
    pub fn policy(&self) -> NonFinitePolicy {
        self.policy
    }

    /// Classify a command produced by this stage.
    #[inline]
    pub fn saturation(&self, command: f64) -> Saturation {
        self.bounds.classify(command)
    }
}

impl GainLimit for LinearGainLimit {
    #[inline]
    fn apply(&self, x: f64) -> f64 {
        saturate(self.gain * x, self.bounds, self.policy)
    }

    #[inline]
    fn bounds(&self) -> Bounds {
        self.bounds
    }
}
