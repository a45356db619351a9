//! Reference and disturbance signals indexed by cycle number.
//!
//! Both are closed-form functions of the step index, so a run is fully
//! reproducible without any random state.

use serde::{Deserialize, Serialize};

/// Target (setpoint) trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetSignal {
    /// Fixed setpoint
    Constant {
        /// Setpoint value
        value: f64,
    },
    /// `base + ramp_rate·k + amplitude·sin(omega·k)`
    RampSine {
        /// Value at `k = 0`
        base: f64,
        /// Drift per cycle
        ramp_rate: f64,
        /// Sine amplitude
        amplitude: f64,
        /// Angular frequency in radians per cycle
        omega: f64,
    },
}

impl TargetSignal {
    /// Setpoint at cycle `k`.
    ///
    /// ```
    /// use ect_sim::signal::TargetSignal;
    ///
    /// assert_eq!(TargetSignal::Constant { value: 45.0 }.at(17), 45.0);
    /// ```
    pub fn at(&self, k: u32) -> f64 {
        match *self {
            TargetSignal::Constant { value } => value,
            TargetSignal::RampSine {
                base,
                ramp_rate,
                amplitude,
                omega,
            } => {
                let k = f64::from(k);
                base + ramp_rate * k + amplitude * (omega * k).sin()
            }
        }
    }
}

/// Deterministic noise-like disturbance: a mix of three incommensurate sines.
///
/// `amplitude·(0.6·sin(0.37k) + 0.3·sin(1.11k) + 0.1·sin(2.73k))`, so the
/// magnitude never exceeds `amplitude`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SineMixNoise {
    /// Peak magnitude
    pub amplitude: f64,
}

impl SineMixNoise {
    /// Create a disturbance with the given amplitude.
    pub fn new(amplitude: f64) -> Self {
        Self { amplitude }
    }

    /// Disturbance at cycle `k`.
    pub fn at(&self, k: u32) -> f64 {
        let k = f64::from(k);
        self.amplitude
            * (0.6 * (0.37 * k).sin() + 0.3 * (1.11 * k).sin() + 0.1 * (2.73 * k).sin())
    }
}

impl Default for SineMixNoise {
    fn default() -> Self {
        Self::new(0.05)
    }
}
