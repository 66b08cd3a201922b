//! TUI module for kinesim.
//!
//! Holds the testable application state for the terminal host. Terminal
//! I/O stays in `src/bin/kinesim_tui.rs`.

pub mod app;

pub use app::{KinematicsApp, WallClockDriver};
