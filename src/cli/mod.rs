//! CLI module for kinesim.
//!
//! All command logic lives here so `main.rs` only parses arguments,
//! installs logging and calls [`run_cli`].

mod args;
mod commands;
mod output;

pub use args::{Args, Command, SourceArgs};
pub use commands::{execute, run_cli, run_session};
pub use output::{
    format_presets, format_run_json, format_run_summary, format_trajectory, format_version,
    RunReport,
};
