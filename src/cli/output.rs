//! CLI output formatting.
//!
//! Formatters return strings so command output can be asserted on.

use serde::Serialize;

use crate::config::{DemoPreset, SessionConfig};
use crate::engine::{RunSummary, TrajectoryPath};
use crate::error::KinResult;

/// Machine-readable run report.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub demo: &'a str,
    pub law: &'static str,
    pub time_scale: f64,
    #[serde(flatten)]
    pub summary: &'a RunSummary,
}

/// Version line plus build metadata.
#[must_use]
pub fn format_version() -> String {
    let mut out = format!("kinesim {}", env!("CARGO_PKG_VERSION"));
    if let Some(hash) = option_env!("GIT_HASH") {
        out.push_str(&format!(" ({hash})"));
    }
    if let Some(ts) = option_env!("BUILD_TIMESTAMP") {
        out.push_str(&format!("\nbuilt at unix time {ts}"));
    }
    out
}

/// One line per preset.
#[must_use]
pub fn format_presets() -> String {
    DemoPreset::ALL
        .iter()
        .map(|preset| {
            let config = preset.config();
            format!(
                "{:<12} {:<22} {}",
                preset.name(),
                config.law().name(),
                config.demo.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human-readable run summary.
#[must_use]
pub fn format_run_summary(config: &SessionConfig, summary: &RunSummary) -> String {
    let state = &summary.final_state;
    let stats = &summary.stats;
    let name = if config.demo.name.is_empty() {
        "(unnamed)"
    } else {
        config.demo.name.as_str()
    };

    [
        format!("Demo:         {name} ({})", config.law().name()),
        format!("Time scale:   {}", config.clock.time_scale),
        format!("Frames:       {}", summary.frames),
        format!("Sim time:     {:.3}s", state.sim_time),
        format!("Position:     {}", state.position),
        format!("Velocity:     {}", state.velocity),
        format!("Acceleration: {}", state.acceleration),
        format!(
            "Updates:      {} (skipped {}, clamped {}, frozen {})",
            stats.updates, stats.skipped_updates, stats.clamped_frames, stats.frozen_frames
        ),
        format!(
            "Terminated:   {}",
            if summary.terminated { "yes" } else { "no" }
        ),
    ]
    .join("\n")
}

/// JSON run report.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn format_run_json(config: &SessionConfig, summary: &RunSummary) -> KinResult<String> {
    let report = RunReport {
        demo: &config.demo.name,
        law: config.law().name(),
        time_scale: config.clock.time_scale,
        summary,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// JSON trajectory overlay.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn format_trajectory(path: &TrajectoryPath) -> KinResult<String> {
    Ok(serde_json::to_string_pretty(path)?)
}
