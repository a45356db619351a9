//! Actuator saturation
//!
//! Bounds validation, the non-finite input policy and the comparison-safe
//! clamp used by the gain-and-limit stage.

use serde::{Deserialize, Serialize};

use crate::error::{BoundSide, ConfigError};

/// Mapping applied when a NaN reaches the saturation clamp.
///
/// A comparison-only clamp passes NaN through because every relational
/// comparison against NaN is false. The gain-and-limit stage instead pins
/// NaN to the bound selected here.
///
/// The command is the bound itself, so with an infinite bound (for example
/// [`Bounds::UNBOUNDED`]) a NaN maps to `-inf` or `+inf`. Pick finite bounds
/// on the selected side when the command must always be usable by an
/// actuator, or use the strict `try_apply` path to reject NaN instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonFinitePolicy {
    /// Command `u_min`
    #[default]
    LowerBound,
    /// Command `u_max`
    UpperBound,
}

/// Saturation state of a produced command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Saturation {
    /// Strictly inside the bounds
    Free,
    /// Pinned at `u_min`
    AtMin,
    /// Pinned at `u_max`
    AtMax,
}

impl Saturation {
    /// Log label (`FREE`, `SAT_MIN`, `SAT_MAX`).
    pub fn label(self) -> &'static str {
        match self {
            Saturation::Free => "FREE",
            Saturation::AtMin => "SAT_MIN",
            Saturation::AtMax => "SAT_MAX",
        }
    }

    /// True when pinned at either bound.
    pub fn is_saturated(self) -> bool {
        !matches!(self, Saturation::Free)
    }
}

/// Validated actuator bounds `[min, max]`.
///
/// Bounds may be infinite; `Bounds::UNBOUNDED` never binds for finite input.
/// NaN bounds and `min > max` are rejected.
///
/// # Example
///
/// ```
/// use ect_core::Bounds;
///
/// let bounds = Bounds::new(-1.0, 1.0)?;
/// assert!(bounds.contains(0.5));
/// assert!(Bounds::new(1.0, -1.0).is_err());
/// # Ok::<(), ect_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    /// `[-inf, +inf]`
    pub const UNBOUNDED: Bounds = Bounds {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Create validated bounds.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NanBound`] if either bound is NaN
    /// - [`ConfigError::InvertedBounds`] if `u_min > u_max`
    pub fn new(u_min: f64, u_max: f64) -> Result<Self, ConfigError> {
        if u_min.is_nan() {
            return Err(ConfigError::NanBound {
                side: BoundSide::Lower,
            });
        }
        if u_max.is_nan() {
            return Err(ConfigError::NanBound {
                side: BoundSide::Upper,
            });
        }
        if u_min > u_max {
            return Err(ConfigError::InvertedBounds { u_min, u_max });
        }
        Ok(Self {
            min: u_min,
            max: u_max,
        })
    }

    /// Lower bound.
    #[inline]
    pub fn min(self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[inline]
    pub fn max(self) -> f64 {
        self.max
    }

    /// True if `value` lies in `[min, max]`. NaN is never contained.
    #[inline]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Classify a command produced under these bounds.
    #[inline]
    pub fn classify(self, command: f64) -> Saturation {
        if command <= self.min {
            Saturation::AtMin
        } else if command >= self.max {
            Saturation::AtMax
        } else {
            Saturation::Free
        }
    }
}

/// Clamp `value` into `bounds`, mapping NaN through `policy`.
///
/// Returns exactly `bounds.min()` below the range and exactly `bounds.max()`
/// above it, so repeated saturation is idempotent. `±inf` are ordered values
/// and saturate by sign. NaN returns the bound chosen by `policy`, which is
/// infinite when that side of `bounds` is unbounded.
///
/// # RT Safety
///
/// - No heap allocations
/// - O(1), at most three comparisons
///
/// # Example
///
/// ```
/// use ect_core::{Bounds, NonFinitePolicy, saturate};
///
/// let bounds = Bounds::new(-1.0, 1.0)?;
/// assert_eq!(saturate(5.0, bounds, NonFinitePolicy::LowerBound), 1.0);
/// assert_eq!(saturate(f64::NAN, bounds, NonFinitePolicy::UpperBound), 1.0);
/// # Ok::<(), ect_core::ConfigError>(())
/// ```
#[inline]
pub fn saturate(value: f64, bounds: Bounds, policy: NonFinitePolicy) -> f64 {
    if value.is_nan() {
        return match policy {
            NonFinitePolicy::LowerBound => bounds.min,
            NonFinitePolicy::UpperBound => bounds.max,
        };
    }

    if value < bounds.min {
        bounds.min
    } else if value > bounds.max {
        bounds.max
    } else {
        value
    }
}
