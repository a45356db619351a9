//! Plant models driven by the controller output.

use serde::{Deserialize, Serialize};

/// A plant advanced once per control cycle.
pub trait Plant {
    /// Next measured value after applying `command` to a plant at `measured`.
    fn step(&self, measured: f64, command: f64) -> f64;
}

/// Plant whose output integrates the command: `y + response_gain·u`.
///
/// ```
/// use ect_sim::plant::{IntegratorPlant, Plant};
///
/// let plant = IntegratorPlant::new(0.4);
/// assert_eq!(plant.step(1.0, 5.0), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegratorPlant {
    /// Response per unit command
    pub response_gain: f64,
}

impl IntegratorPlant {
    /// Create an integrator with the given response gain.
    pub fn new(response_gain: f64) -> Self {
        Self { response_gain }
    }

    /// Integrator with unit response.
    pub fn unit() -> Self {
        Self::new(1.0)
    }
}

impl Default for IntegratorPlant {
    fn default() -> Self {
        Self::unit()
    }
}

impl Plant for IntegratorPlant {
    #[inline]
    fn step(&self, measured: f64, command: f64) -> f64 {
        measured + self.response_gain * command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrator_accumulates() {
        let plant = IntegratorPlant::unit();
        let mut y = 0.0;
        for _ in 0..4 {
            y = plant.step(y, 0.5);
        }
        assert_eq!(y, 2.0);
    }

    #[test]
    fn test_response_gain_scales_command() {
        let plant = IntegratorPlant::new(0.25);
        assert_eq!(plant.step(0.0, 8.0), 2.0);
        assert_eq!(plant.step(1.0, -4.0), 0.0);
    }
}
