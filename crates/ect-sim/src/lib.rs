//! Closed-loop scenario runner for the ECT controller
//!
//! Drives an [`ect_core`] controller against simple plant models, with
//! reproducible target trajectories and disturbances. The `ect-sim` binary
//! exposes the built-in presets on the command line.
//!
//! # Example
//!
//! ```
//! use ect_sim::scenario::Preset;
//!
//! let report = Preset::Drone.scenario().run()?;
//! assert_eq!(report.records.len(), 25);
//! assert!(report.summary.final_error.abs() < 0.01);
//! # Ok::<(), ect_sim::SimError>(())
//! ```

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod plant;
pub mod scenario;
pub mod signal;

pub use config::{load_controller_config, load_scenario};
pub use error::SimError;
pub use plant::{IntegratorPlant, Plant};
pub use scenario::{Preset, RunReport, RunSummary, Scenario, StepRecord, simulate};
pub use signal::{SineMixNoise, TargetSignal};
