//! Closed-loop scenarios
//!
//! A [`Scenario`] pairs a controller configuration with a plant, a target
//! trajectory and an optional disturbance. Running it steps the loop
//!
//! ```text
//! delta = target(k) - measured + noise(k)
//! u     = controller.update(delta)
//! measured = plant.step(measured, u)
//! ```
//!
//! and records every cycle. The presets reproduce the reference driver
//! programs shipped with the SDK.

use clap::ValueEnum;
use ect_core::{
    Contraction, Controller, ControllerConfig, ForwardTransform, GainLimit, InverseTransform,
    Saturation,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::SimError;
use crate::plant::{IntegratorPlant, Plant};
use crate::signal::{SineMixNoise, TargetSignal};

/// Consecutive saturated cycles after which a warning is logged.
pub const SATURATION_STREAK_WARN: u32 = 10;

/// Built-in scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Preset {
    /// Altitude hold: thrust command, plant gain 0.4, target 10
    Drone,
    /// Servo positioning: plant gain 0.3, target 45
    Servo,
    /// Target far outside the actuator range
    SaturationStress,
    /// Constant target with deterministic measurement noise
    Noise,
    /// Ramp-plus-sine target with unit bounds
    Tracking,
    /// Ramp-plus-sine target with bounds that bind continuously
    TrackingSaturated,
    /// Bare contraction loop with non-binding bounds
    Contraction,
}

impl Preset {
    /// Every preset, in listing order.
    pub const ALL: [Preset; 7] = [
        Preset::Drone,
        Preset::Servo,
        Preset::SaturationStress,
        Preset::Noise,
        Preset::Tracking,
        Preset::TrackingSaturated,
        Preset::Contraction,
    ];

    /// Command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Drone => "drone",
            Preset::Servo => "servo",
            Preset::SaturationStress => "saturation-stress",
            Preset::Noise => "noise",
            Preset::Tracking => "tracking",
            Preset::TrackingSaturated => "tracking-saturated",
            Preset::Contraction => "contraction",
        }
    }

    /// One-line description.
    pub fn description(self) -> &'static str {
        match self {
            Preset::Drone => "Drone altitude hold, thrust in [-10, 10], target 10",
            Preset::Servo => "Servo position control, command in [-100, 100], target 45",
            Preset::SaturationStress => "Target 100 with commands limited to [-1, 1]",
            Preset::Noise => "Target 10 with deterministic sine-mix measurement noise",
            Preset::Tracking => "Ramp-plus-sine target, commands in [-1, 1]",
            Preset::TrackingSaturated => "Ramp-plus-sine target, commands in [-0.1, 0.1]",
            Preset::Contraction => "Contraction loop from error 1 with non-binding bounds",
        }
    }

    /// Build the scenario.
    pub fn scenario(self) -> Scenario {
        let tracking_target = TargetSignal::RampSine {
            base: 0.0,
            ramp_rate: 0.02,
            amplitude: 1.0,
            omega: 0.15,
        };

        let (controller, plant, target, noise, steps) = match self {
            Preset::Drone => (
                ControllerConfig::linear(0.8, 1.0, -10.0, 10.0),
                IntegratorPlant::new(0.4),
                TargetSignal::Constant { value: 10.0 },
                None,
                25,
            ),
            Preset::Servo => (
                ControllerConfig::linear(0.8, 1.0, -100.0, 100.0),
                IntegratorPlant::new(0.3),
                TargetSignal::Constant { value: 45.0 },
                None,
                20,
            ),
            Preset::SaturationStress => (
                ControllerConfig::linear(0.8, 1.0, -1.0, 1.0),
                IntegratorPlant::unit(),
                TargetSignal::Constant { value: 100.0 },
                None,
                120,
            ),
            Preset::Noise => (
                ControllerConfig::linear(0.8, 1.0, -2.0, 2.0),
                IntegratorPlant::unit(),
                TargetSignal::Constant { value: 10.0 },
                Some(SineMixNoise::default()),
                80,
            ),
            Preset::Tracking => (
                ControllerConfig::linear(0.8, 1.0, -1.0, 1.0),
                IntegratorPlant::unit(),
                tracking_target,
                None,
                200,
            ),
            Preset::TrackingSaturated => (
                ControllerConfig::linear(0.8, 1.0, -0.1, 0.1),
                IntegratorPlant::unit(),
                tracking_target,
                None,
                200,
            ),
            Preset::Contraction => (
                ControllerConfig::linear(0.8, 1.0, -1e9, 1e9),
                IntegratorPlant::unit(),
                TargetSignal::Constant { value: 1.0 },
                None,
                10,
            ),
        };

        Scenario {
            name: self.name().to_string(),
            controller,
            plant,
            target,
            noise,
            steps,
            initial: 0.0,
        }
    }
}

/// A closed-loop experiment.
///
/// Serializes to the same document [`load_scenario`](crate::load_scenario)
/// reads, so a preset can be dumped, edited and run from a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Scenario name, used in logs and output
    pub name: String,
    /// Controller configuration
    pub controller: ControllerConfig,
    /// Plant model
    pub plant: IntegratorPlant,
    /// Target trajectory
    pub target: TargetSignal,
    /// Disturbance added to the error signal
    #[serde(default)]
    pub noise: Option<SineMixNoise>,
    /// Number of control cycles
    pub steps: u32,
    /// Initial measured value
    #[serde(default)]
    pub initial: f64,
}

impl Scenario {
    /// Override the cycle count.
    #[must_use]
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    /// Replace the controller configuration.
    #[must_use]
    pub fn with_controller(mut self, controller: ControllerConfig) -> Self {
        self.controller = controller;
        self
    }

    /// Build the controller and run the loop.
    ///
    /// # Errors
    ///
    /// [`SimError::Controller`] if the controller configuration is invalid.
    pub fn run(&self) -> Result<RunReport, SimError> {
        let controller = self.controller.build()?;
        Ok(simulate(&controller, &self.plant, self))
    }
}

/// One control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepRecord {
    /// Cycle index, from 0
    pub step: u32,
    /// Setpoint for this cycle
    pub target: f64,
    /// Disturbance added to the error
    pub noise: f64,
    /// Controller input
    pub delta: f64,
    /// Controller output
    pub command: f64,
    /// Plant output after applying `command`
    pub measured: f64,
    /// Saturation state of `command`
    pub saturation: Saturation,
}

/// Aggregate statistics of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Scenario name
    pub scenario: String,
    /// Cycles executed
    pub steps: u32,
    /// `target - measured` after the last cycle, without noise
    pub final_error: f64,
    /// Largest `|command|` produced
    pub max_abs_command: f64,
    /// Cycles whose command sat on a bound
    pub saturated_steps: u32,
    /// Longest run of consecutive saturated cycles
    pub longest_saturation_streak: u32,
}

/// Per-cycle records plus the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Aggregate statistics
    pub summary: RunSummary,
    /// One record per cycle
    pub records: Vec<StepRecord>,
}

/// Drive `controller` against `plant` for the scenario's target, noise and
/// step count.
///
/// The controller and plant are taken separately from the scenario so any
/// stage implementation can be exercised against the same experiment.
pub fn simulate<F, E, I, G, P>(
    controller: &Controller<F, E, I, G>,
    plant: &P,
    scenario: &Scenario,
) -> RunReport
where
    F: ForwardTransform,
    E: Contraction,
    I: InverseTransform,
    G: GainLimit,
    P: Plant,
{
    let bounds = controller.bounds();
    let capacity = usize::try_from(scenario.steps).unwrap_or(0);
    let mut records = Vec::with_capacity(capacity);

    let mut measured = scenario.initial;
    let mut final_target = scenario.target.at(0);
    let mut max_abs_command: f64 = 0.0;
    let mut saturated_steps: u32 = 0;
    let mut streak: u32 = 0;
    let mut longest_streak: u32 = 0;

    for step in 0..scenario.steps {
        let target = scenario.target.at(step);
        let noise = scenario.noise.map_or(0.0, |n| n.at(step));
        let delta = target - measured + noise;

        let command = controller.update(delta);
        measured = plant.step(measured, command);

        let saturation = bounds.classify(command);
        if saturation.is_saturated() {
            saturated_steps = saturated_steps.saturating_add(1);
            streak = streak.saturating_add(1);
            longest_streak = longest_streak.max(streak);
            if streak == SATURATION_STREAK_WARN {
                warn!(
                    scenario = %scenario.name,
                    step,
                    state = saturation.label(),
                    "Command saturated for {} consecutive cycles",
                    SATURATION_STREAK_WARN
                );
            }
        } else {
            streak = 0;
        }

        debug!(
            step,
            setpoint = target,
            delta,
            command,
            measured,
            state = saturation.label(),
            "Control cycle"
        );

        max_abs_command = max_abs_command.max(command.abs());
        final_target = target;
        records.push(StepRecord {
            step,
            target,
            noise,
            delta,
            command,
            measured,
            saturation,
        });
    }

    let summary = RunSummary {
        scenario: scenario.name.clone(),
        steps: scenario.steps,
        final_error: final_target - measured,
        max_abs_command,
        saturated_steps,
        longest_saturation_streak: longest_streak,
    };

    info!(
        scenario = %summary.scenario,
        steps = summary.steps,
        final_error = summary.final_error,
        saturated_steps = summary.saturated_steps,
        "Scenario complete"
    );

    RunReport { summary, records }
}
