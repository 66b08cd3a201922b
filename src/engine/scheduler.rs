//! Frame scheduling: continuation policy and host drivers.
//!
//! The session exposes a plain `step(timestamp) -> StepOutcome`; how the
//! next frame is requested belongs to a [`FrameDriver`]. This keeps the step
//! testable without a live display loop.
//!
//! ```text
//! Scheduled ──step──▶ Running ──Continue──▶ Scheduled
//!                        │
//!                        └──Stop──▶ Stopped   (only `restart` leaves it)
//! ```

use serde::{Deserialize, Serialize};

use crate::engine::state::KinematicState;

/// Result of one scheduled step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Request another frame.
    Continue,
    /// Do not reschedule.
    Stop,
}

impl StepOutcome {
    /// Whether the host should request another frame.
    #[must_use]
    pub const fn should_continue(self) -> bool {
        matches!(self, Self::Continue)
    }
}

/// Lifecycle of the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SchedulerPhase {
    /// A frame is requested but not yet delivered.
    #[default]
    Scheduled,
    /// A step is executing.
    Running,
    /// Terminal; further steps are ignored until a restart.
    Stopped,
}

/// When the loop stops rescheduling itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationPolicy {
    /// Reschedule forever.
    #[default]
    Never,
    /// Stop once an update brings the point down to `y <= 0`.
    GroundContact,
}

impl TerminationPolicy {
    /// Decide termination after an integrator update from `before` to `after`.
    ///
    /// Ground contact fires when the update started above ground and ended
    /// at or below it, or when it started at or below ground and kept
    /// descending. A launch from `y = 0` upward therefore continues.
    #[must_use]
    pub fn reached(self, before: &KinematicState, after: &KinematicState) -> bool {
        match self {
            Self::Never => false,
            Self::GroundContact => {
                let (y0, y1) = (before.position.y, after.position.y);
                y1 <= 0.0 && (y0 > 0.0 || y1 < y0)
            }
        }
    }
}

/// Source of frame timestamps for a host loop.
pub trait FrameDriver {
    /// Timestamp of the next frame in milliseconds, or `None` when the host
    /// has no more frames to deliver.
    fn next_timestamp(&mut self) -> Option<f64>;
}

/// Headless driver delivering frames at a fixed interval.
#[derive(Debug, Clone)]
pub struct FixedRateDriver {
    next_ms: f64,
    interval_ms: f64,
    remaining: Option<u64>,
}

impl FixedRateDriver {
    /// 60 Hz frame interval.
    pub const SIXTY_HZ_MS: f64 = 1000.0 / 60.0;

    /// Deliver frames every `interval_ms`, starting at `start_ms`.
    #[must_use]
    pub const fn new(start_ms: f64, interval_ms: f64) -> Self {
        Self {
            next_ms: start_ms,
            interval_ms,
            remaining: None,
        }
    }

    /// Stop after `frames` timestamps.
    #[must_use]
    pub const fn with_frame_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }

    /// Frame interval in milliseconds.
    #[must_use]
    pub const fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}

impl Default for FixedRateDriver {
    fn default() -> Self {
        Self::new(0.0, Self::SIXTY_HZ_MS)
    }
}

impl FrameDriver for FixedRateDriver {
    fn next_timestamp(&mut self) -> Option<f64> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        let t = self.next_ms;
        self.next_ms += self.interval_ms;
        Some(t)
    }
}

/// Replays an explicit list of timestamps.
#[derive(Debug, Clone, Default)]
pub struct ReplayDriver {
    timestamps: std::collections::VecDeque<f64>,
}

impl ReplayDriver {
    /// Deliver `timestamps` in order.
    #[must_use]
    pub fn new(timestamps: impl IntoIterator<Item = f64>) -> Self {
        Self {
            timestamps: timestamps.into_iter().collect(),
        }
    }
}

impl FrameDriver for ReplayDriver {
    fn next_timestamp(&mut self) -> Option<f64> {
        self.timestamps.pop_front()
    }
}

/// Per-session frame counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Steps executed, including paused ones.
    pub frames: u64,
    /// Steps that advanced the state.
    pub updates: u64,
    /// Running steps whose delta was zero or rejected.
    pub skipped_updates: u64,
    /// Steps whose real delta hit the gap clamp.
    pub clamped_frames: u64,
    /// Updates discarded by the state guard.
    pub frozen_frames: u64,
}

/// Summary of a driven run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Frames delivered by the driver.
    pub frames: u64,
    /// Whether the termination policy ended the run.
    pub terminated: bool,
    /// Final kinematic state.
    pub final_state: KinematicState,
    /// Session counters at the end of the run.
    pub stats: SessionStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::Vec2;

    fn at_height(y: f64) -> KinematicState {
        KinematicState::new(Vec2::new(0.0, y), Vec2::zero(), Vec2::zero())
    }

    #[test]
    fn test_never_policy() {
        assert!(!TerminationPolicy::Never.reached(&at_height(10.0), &at_height(-10.0)));
    }

    #[test]
    fn test_ground_contact_crossing() {
        let policy = TerminationPolicy::GroundContact;
        assert!(policy.reached(&at_height(5.0), &at_height(-1.0)));
        assert!(policy.reached(&at_height(5.0), &at_height(0.0)));
        assert!(!policy.reached(&at_height(5.0), &at_height(1.0)));
    }

    #[test]
    fn test_ground_contact_launch_from_ground() {
        let policy = TerminationPolicy::GroundContact;
        // rising off the ground continues
        assert!(!policy.reached(&at_height(0.0), &at_height(1.6)));
        // resting on the ground continues
        assert!(!policy.reached(&at_height(0.0), &at_height(0.0)));
        // sinking below the ground stops
        assert!(policy.reached(&at_height(0.0), &at_height(-0.5)));
    }

    #[test]
    fn test_fixed_rate_driver() {
        let mut driver = FixedRateDriver::new(100.0, 10.0).with_frame_limit(3);
        assert_eq!(driver.next_timestamp(), Some(100.0));
        assert_eq!(driver.next_timestamp(), Some(110.0));
        assert_eq!(driver.next_timestamp(), Some(120.0));
        assert_eq!(driver.next_timestamp(), None);
    }

    #[test]
    fn test_unbounded_driver() {
        let mut driver = FixedRateDriver::default();
        for _ in 0..1000 {
            assert!(driver.next_timestamp().is_some());
        }
        assert!((driver.interval_ms() - 1000.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_replay_driver() {
        let mut driver = ReplayDriver::new([0.0, 16.0, 40.0]);
        assert_eq!(driver.next_timestamp(), Some(0.0));
        assert_eq!(driver.next_timestamp(), Some(16.0));
        assert_eq!(driver.next_timestamp(), Some(40.0));
        assert_eq!(driver.next_timestamp(), None);
    }

    #[test]
    fn test_step_outcome() {
        assert!(StepOutcome::Continue.should_continue());
        assert!(!StepOutcome::Stop.should_continue());
        assert_eq!(SchedulerPhase::default(), SchedulerPhase::Scheduled);
    }
}
