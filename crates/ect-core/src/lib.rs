//! Error-Correction Transform (ECT) Controller
//!
//! This crate provides a minimal feedback-control primitive: a four-stage
//! pipeline that turns a scalar error signal into a bounded actuator command.
//!
//! # Overview
//!
//! ```text
//! delta → ForwardTransform → Contraction → InverseTransform → GainLimit → u
//! ```
//!
//! - **Operators** ([`operator`]): one trait per stage, each a pure `apply(x) -> y`
//! - **Linear variants** ([`linear`]): identity transforms, scalar contraction,
//!   scalar gain with saturation
//! - **Saturation** ([`saturation`]): validated bounds and the NaN-safe clamp
//! - **Controller** ([`controller`]): composition exposing `update(delta) -> u`
//! - **Configuration** ([`config`]): serde records that build a controller
//!
//! With identity transforms, contraction gain `α` and non-binding bounds, the
//! closed loop `delta ← delta - update(delta)` reduces the error by exactly
//! `1 - α` per cycle.
//!
//! # RT Safety Guarantees
//!
//! - No heap allocations in `update()` / `apply()`
//! - O(1) time complexity, no loops in the hot path
//! - No syscalls, I/O or locking
//! - Immutable after construction; safe to call from many threads
//! - The command is never NaN: NaN reaching the gain-and-limit stage is
//!   pinned to a bound chosen by [`NonFinitePolicy`]
//!
//! # Example
//!
//! ```
//! use ect_core::prelude::*;
//!
//! // Build once, at initialization time
//! let controller = LinearController::linear(0.8, 1.0, -1e9, 1e9)?;
//!
//! // Control loop, owned by the caller
//! let mut delta = 1.0;
//! for _ in 0..5 {
//!     let next = delta - controller.update(delta);
//!     assert!((next / delta - 0.2).abs() < 1e-12);
//!     delta = next;
//! }
//! # Ok::<(), ConfigError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod build_info;
pub mod config;
pub mod controller;
pub mod error;
pub mod linear;
pub mod operator;
pub mod prelude;
pub mod saturation;

pub use config::{ContractionConfig, ControllerConfig, ForwardConfig, GainLimitConfig, InverseConfig};
pub use controller::{Controller, LinearController, StageTrace};
pub use error::{BoundSide, ConfigError, EctError, ErrorCategory, NumericError, Stage};
pub use linear::{IdentityForward, IdentityInverse, LinearContraction, LinearGainLimit};
pub use operator::{Contraction, ForwardTransform, GainLimit, InverseTransform};
pub use saturation::{Bounds, NonFinitePolicy, Saturation, saturate};
