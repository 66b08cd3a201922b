//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{DemoPreset, SessionConfig};
use crate::engine::FixedRateDriver;
use crate::error::KinResult;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "kinesim", version, about = "Point-mass kinematics demos")]
pub struct Args {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Run a session headless and print a summary
    Run {
        #[command(flatten)]
        source: SourceArgs,
        /// Maximum number of frames to deliver
        #[arg(long, default_value_t = 600)]
        frames: u64,
        /// Frame interval in milliseconds
        #[arg(long, default_value_t = FixedRateDriver::SIXTY_HZ_MS)]
        frame_ms: f64,
        /// Override the configured time scale
        #[arg(long)]
        time_scale: Option<f64>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the sampled trajectory overlay as JSON
    Trajectory {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List built-in presets
    Presets,
    /// Show version and build information
    Version,
}

/// Where a session configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Session configuration file (YAML)
    pub config: Option<PathBuf>,
    /// Built-in preset
    #[arg(long, value_enum)]
    pub preset: Option<DemoPreset>,
}

impl SourceArgs {
    /// Resolve to a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or fails validation.
    pub fn load(&self) -> KinResult<SessionConfig> {
        match (&self.config, self.preset) {
            (Some(path), _) => SessionConfig::load(path),
            (None, preset) => Ok(preset.unwrap_or_default().config()),
        }
    }
}
