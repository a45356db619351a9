//! The ECT controller
//!
//! Composes the four operator capabilities into one command-producing
//! function:
//!
//! ```text
//! delta → forward → contraction → inverse → gain-and-limit → u
//! ```
//!
//! The controller carries no state between calls. Stepping, timing and the
//! plant model belong to the caller.

use serde::Serialize;

use crate::error::{ConfigError, NumericError, Stage};
use crate::linear::{IdentityForward, IdentityInverse, LinearContraction, LinearGainLimit};
use crate::operator::{Contraction, ForwardTransform, GainLimit, InverseTransform};
use crate::saturation::Bounds;

/// Controller built from the linear variant of every stage.
pub type LinearController =
    Controller<IdentityForward, LinearContraction, IdentityInverse, LinearGainLimit>;

/// Intermediate values of one [`Controller::trace`] call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageTrace {
    /// Controller input
    pub delta: f64,
    /// Forward transform output
    pub forward: f64,
    /// Contraction output
    pub contracted: f64,
    /// Inverse transform output
    pub inverse: f64,
    /// Gain-and-limit output (the command)
    pub command: f64,
}

/// Four-stage error-correction controller.
///
/// The controller owns its stages. To share a stage between controllers,
/// pass `&T` or `Arc<T>`; both implement the stage traits.
///
/// # RT Safety
///
/// - `update()` performs no allocation, no I/O and no locking
/// - O(1): four stage evaluations
/// - `Sync` whenever every stage is `Sync`, so one instance can be called
///   from many threads
///
/// # Example
///
/// ```
/// use ect_core::prelude::*;
///
/// let controller = Controller::new(
///     IdentityForward,
///     LinearContraction::new(0.8)?,
///     IdentityInverse,
///     LinearGainLimit::new(1.0, -10.0, 10.0)?,
/// );
///
/// let mut altitude = 0.0;
/// for _ in 0..25 {
///     let thrust = controller.update(10.0 - altitude);
///     altitude += 0.4 * thrust;
/// }
/// assert!((10.0 - altitude).abs() < 0.01);
/// # Ok::<(), ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controller<F, E, I, G> {
    forward: F,
    contraction: E,
    inverse: I,
    gain_limit: G,
}

impl<F, E, I, G> Controller<F, E, I, G>
where
    F: ForwardTransform,
    E: Contraction,
    I: InverseTransform,
    G: GainLimit,
{
    /// Compose four already-constructed stages.
    pub fn new(forward: F, contraction: E, inverse: I, gain_limit: G) -> Self {
        Self {
            forward,
            contraction,
            inverse,
            gain_limit,
        }
    }

    /// Produce the actuator command for error `delta`.
    ///
    /// The output always lies within the gain-and-limit stage's bounds.
    #[inline]
    pub fn update(&self, delta: f64) -> f64 {
        let x_f = self.forward.apply(delta);
        let x_e = self.contraction.apply(x_f);
        let x_i = self.inverse.apply(x_e);
        self.gain_limit.apply(x_i)
    }

    /// Strict variant of [`update`](Self::update).
    ///
    /// # Errors
    ///
    /// - [`NumericError::NonFinite`] with [`Stage::Forward`] if `delta` is
    ///   not finite
    /// - [`NumericError::NonFinite`] with [`Stage::GainLimit`] if an upstream
    ///   stage produced a non-finite value
    #[inline]
    pub fn try_update(&self, delta: f64) -> Result<f64, NumericError> {
        if !delta.is_finite() {
            return Err(NumericError::NonFinite {
                stage: Stage::Forward,
                value: delta,
            });
        }
        let x_f = self.forward.apply(delta);
        let x_e = self.contraction.apply(x_f);
        let x_i = self.inverse.apply(x_e);
        self.gain_limit.try_apply(x_i)
    }

    /// Evaluate `delta` and return every intermediate value.
    ///
    /// `trace(d).command` is bit-identical to `update(d)`.
    pub fn trace(&self, delta: f64) -> StageTrace {
        let forward = self.forward.apply(delta);
        let contracted = self.contraction.apply(forward);
        let inverse = self.inverse.apply(contracted);
        let command = self.gain_limit.apply(inverse);
        StageTrace {
            delta,
            forward,
            contracted,
            inverse,
            command,
        }
    }

    /// Actuator bounds of the gain-and-limit stage.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.gain_limit.bounds()
    }

    /// Forward stage.
    pub fn forward(&self) -> &F {
        &self.forward
    }

    /// Contraction stage.
    pub fn contraction(&self) -> &E {
        &self.contraction
    }

    /// Inverse stage.
    pub fn inverse(&self) -> &I {
        &self.inverse
    }

    /// Gain-and-limit stage.
    pub fn gain_limit(&self) -> &G {
        &self.gain_limit
    }

    /// Decompose into the four stages.
    pub fn into_stages(self) -> (F, E, I, G) {
        (self.forward, self.contraction, self.inverse, self.gain_limit)
    }
}

impl LinearController {
    /// Build the linear configuration: identity transforms, contraction
    /// `alpha`, gain-and-limit `(gain, u_min, u_max)`.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] raised by the contraction or gain-and-limit stage.
    ///
    /// # Example
    ///
    /// ```
    /// use ect_core::LinearController;
    ///
    /// let c = LinearController::linear(0.8, 1.0, -1.0, 1.0)?;
    /// assert_eq!(c.update(1e12), 1.0);
    /// assert_eq!(c.update(0.0), 0.0);
    /// # Ok::<(), ect_core::ConfigError>(())
    /// ```
    pub fn linear(alpha: f64, gain: f64, u_min: f64, u_max: f64) -> Result<Self, ConfigError> {
        Ok(Controller::new(
            IdentityForward,
            LinearContraction::new(alpha)?,
            IdentityInverse,
            LinearGainLimit::new(gain, u_min, u_max)?,
        ))
    }
}
