//! CLI command handlers.

use std::process::ExitCode;

use super::args::SourceArgs;
use super::output::{
    format_presets, format_run_json, format_run_summary, format_trajectory, format_version,
};
use super::{Args, Command};
use crate::engine::{FixedRateDriver, KinematicSession};
use crate::error::KinResult;
use crate::render::NullComposer;

/// Main CLI entry point.
///
/// Dispatches to the command handler and prints its output.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match execute(&args.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Execute `command` and return what it prints.
///
/// # Errors
///
/// Returns error if the configuration cannot be loaded or the output
/// cannot be serialized.
pub fn execute(command: &Command) -> KinResult<String> {
    match command {
        Command::Run {
            source,
            frames,
            frame_ms,
            time_scale,
            json,
        } => run_session(source, *frames, *frame_ms, *time_scale, *json),
        Command::Trajectory { source } => {
            let session = KinematicSession::new(source.load()?)?;
            format_trajectory(session.trajectory())
        }
        Command::Presets => Ok(format_presets()),
        Command::Version => Ok(format_version()),
    }
}

/// Run a session headless at a fixed frame rate.
///
/// Headless runs always start the integrator, even for presets that open
/// paused.
///
/// # Errors
///
/// Returns error if the configuration is invalid or serialization fails.
pub fn run_session(
    source: &SourceArgs,
    frames: u64,
    frame_ms: f64,
    time_scale: Option<f64>,
    json: bool,
) -> KinResult<String> {
    let mut config = source.load()?;
    config.clock.running = true;
    if let Some(time_scale) = time_scale {
        config.clock.time_scale = time_scale;
    }
    if !frame_ms.is_finite() || frame_ms <= 0.0 {
        return Err(crate::error::KinError::config(format!(
            "frame interval must be positive, got {frame_ms}"
        )));
    }

    let mut session = KinematicSession::new(config)?;
    let mut driver = FixedRateDriver::new(0.0, frame_ms).with_frame_limit(frames);

    tracing::info!(
        demo = %session.config().demo.name,
        frames,
        frame_ms,
        "running headless session"
    );
    let summary = session.run(&mut driver, &mut NullComposer);

    if json {
        format_run_json(session.config(), &summary)
    } else {
        Ok(format_run_summary(session.config(), &summary))
    }
}
