//! Prelude for the ECT core crate.
//!
//! Re-exports the stage traits, the linear variants and the controller.
//!
//! ```
//! use ect_core::prelude::*;
//!
//! let controller = Controller::new(
//!     IdentityForward,
//!     LinearContraction::new(0.8)?,
//!     IdentityInverse,
//!     LinearGainLimit::new(1.0, -100.0, 100.0)?,
//! );
//! assert!(controller.update(45.0) > 0.0);
//! # Ok::<(), ConfigError>(())
//! ```

pub use crate::config::ControllerConfig;
pub use crate::controller::{Controller, LinearController, StageTrace};
pub use crate::error::{ConfigError, EctError, NumericError, Stage};
pub use crate::linear::{IdentityForward, IdentityInverse, LinearContraction, LinearGainLimit};
pub use crate::operator::{Contraction, ForwardTransform, GainLimit, InverseTransform};
pub use crate::saturation::{Bounds, NonFinitePolicy, Saturation};
