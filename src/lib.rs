//! # kinesim
//!
//! Frame-driven point-mass kinematics.
//!
//! A single point moves under one of three motion laws:
//! - Constant acceleration (projectile), stepped exactly
//! - Uniform velocity
//! - Uniform circular motion, evaluated in closed form
//!
//! A host delivers display-refresh timestamps to a [`KinematicSession`],
//! which scales them into simulated time, advances the state, renders
//! through a [`SceneComposer`] and decides whether another frame is needed.
//!
//! ## Example
//!
//! ```rust
//! use kinesim::prelude::*;
//!
//! let config = SessionConfig::builder()
//!     .preset(DemoPreset::Projectile)
//!     .time_scale(1.0)
//!     .build();
//! let mut session = KinematicSession::new(config).unwrap();
//!
//! let mut driver = FixedRateDriver::default().with_frame_limit(2_000);
//! let summary = session.run(&mut driver, &mut NullComposer);
//! assert!(summary.terminated);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,  // Written to match the kinematic equations term by term
    clippy::imprecise_flops,
    clippy::float_cmp,         // Zero checks on vector components are exact by intent
    clippy::too_many_lines,
    clippy::missing_const_for_fn,
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod panel;
pub mod render;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{DemoPreset, DisplayToggles, MotionConfig, SessionConfig};
    pub use crate::engine::{
        FixedRateDriver, FrameDriver, KinematicSession, KinematicState, MotionLaw, RunSummary,
        StepOutcome, TerminationPolicy, TrajectoryPath, Vec2,
    };
    pub use crate::error::{KinError, KinResult};
    pub use crate::panel::{FieldId, PanelCommand, ParameterPanel};
    pub use crate::render::{CommandRecorder, NullComposer, SceneComposer, Viewport};
}

/// Re-export for public API
pub use engine::KinematicSession;
pub use error::{KinError, KinResult};
pub use render::SceneComposer;
