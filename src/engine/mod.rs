//! Kinematic simulation engine.
//!
//! Implements the per-frame loop with:
//! - Motion laws advancing a single point (exact constant acceleration,
//!   closed-form circular motion)
//! - A frame clock converting host timestamps to scaled deltas
//! - A state guard that freezes the point instead of publishing NaN
//! - Termination policies deciding whether the host reschedules
//!
//! [`KinematicSession`] owns every piece of mutable state. Hosts call
//! [`KinematicSession::step`] once per display refresh; panel edits go
//! through [`KinematicSession::submit`] and apply at the top of the next
//! step.

pub mod clock;
pub mod guard;
pub mod integrator;
pub mod scheduler;
pub mod state;
pub mod trajectory;

use std::collections::VecDeque;

pub use clock::{FrameClock, FrameDelta};
pub use guard::{GuardVerdict, StateGuard};
pub use integrator::MotionLaw;
pub use scheduler::{
    FixedRateDriver, FrameDriver, ReplayDriver, RunSummary, SchedulerPhase, SessionStats,
    StepOutcome, TerminationPolicy,
};
pub use state::{KinematicState, Vec2};
pub use trajectory::{TrajectoryPath, TrajectorySampler};

use crate::config::{DisplayToggles, SessionConfig};
use crate::error::KinResult;
use crate::panel::PanelCommand;
use crate::render::{compose_frame, NullComposer, Palette, SceneComposer};

/// Owned simulation context for one demo session.
#[derive(Debug, Clone)]
pub struct KinematicSession {
    /// Configuration the session was built from, updated by panel commits.
    config: SessionConfig,
    /// Active motion law.
    law: MotionLaw,
    /// Live state.
    state: KinematicState,
    /// State a restart returns to.
    initial: KinematicState,
    /// Overlay path derived from `initial`.
    trajectory: TrajectoryPath,
    clock: FrameClock,
    guard: StateGuard,
    phase: SchedulerPhase,
    running: bool,
    display: DisplayToggles,
    palette: Palette,
    /// Panel edits waiting for the next step.
    pending: VecDeque<PanelCommand>,
    stats: SessionStats,
}

impl KinematicSession {
    /// Create a session from a configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration fails validation.
    pub fn new(config: SessionConfig) -> KinResult<Self> {
        config.validate_all()?;

        let law = config.law();
        let initial = config.initial_state();
        let trajectory = config.sampler().sample(&law, &initial, config.termination);

        tracing::debug!(
            demo = %config.demo.name,
            law = law.name(),
            "session created"
        );

        Ok(Self {
            law,
            state: initial,
            initial,
            trajectory,
            clock: FrameClock::new(config.clock.time_scale, config.clock.max_real_delta_secs),
            guard: StateGuard::new(),
            phase: SchedulerPhase::Scheduled,
            running: config.clock.running,
            display: config.display,
            palette: Palette::default(),
            pending: VecDeque::new(),
            stats: SessionStats::default(),
            config,
        })
    }

    /// Queue a panel command for the next step.
    pub fn submit(&mut self, command: PanelCommand) {
        self.pending.push_back(command);
    }

    /// Execute one frame at `timestamp_ms` and render it.
    ///
    /// Once the termination policy fires the session is `Stopped`; further
    /// calls render nothing and return `Stop` until [`restart`](Self::restart).
    pub fn step<C: SceneComposer + ?Sized>(
        &mut self,
        timestamp_ms: f64,
        composer: &mut C,
    ) -> StepOutcome {
        // a queued restart re-arms a stopped session
        self.drain_commands();

        if self.phase == SchedulerPhase::Stopped {
            return StepOutcome::Stop;
        }
        self.phase = SchedulerPhase::Running;

        let delta = self.clock.tick(timestamp_ms);
        self.stats.frames += 1;

        if delta.clamped {
            self.stats.clamped_frames += 1;
            tracing::warn!(
                timestamp_ms,
                max_real_delta_secs = ?self.clock.max_real_delta_secs(),
                "frame gap clamped"
            );
        }

        let mut terminated = false;
        if self.running {
            if delta.is_advancing() {
                terminated = self.integrate(delta.scaled_secs);
            } else if !delta.first_frame {
                self.stats.skipped_updates += 1;
            }
        }

        compose_frame(
            composer,
            &self.state,
            &self.display,
            Some(&self.trajectory),
            &self.palette,
        );

        if terminated {
            self.phase = SchedulerPhase::Stopped;
            tracing::info!(
                sim_time = self.state.sim_time,
                position = %self.state.position,
                "simulation ended"
            );
            StepOutcome::Stop
        } else {
            self.phase = SchedulerPhase::Scheduled;
            StepOutcome::Continue
        }
    }

    /// [`step`](Self::step) without rendering.
    pub fn advance(&mut self, timestamp_ms: f64) -> StepOutcome {
        self.step(timestamp_ms, &mut NullComposer)
    }

    /// Drive the session until it stops or `driver` runs out of frames.
    pub fn run<D, C>(&mut self, driver: &mut D, composer: &mut C) -> RunSummary
    where
        D: FrameDriver + ?Sized,
        C: SceneComposer + ?Sized,
    {
        let mut frames = 0;
        let mut terminated = false;

        while let Some(timestamp_ms) = driver.next_timestamp() {
            frames += 1;
            if !self.step(timestamp_ms, composer).should_continue() {
                terminated = true;
                break;
            }
        }

        RunSummary {
            frames,
            terminated,
            final_state: self.state,
            stats: self.stats,
        }
    }

    /// Reset the motion to the configured initial values.
    ///
    /// Re-arms a stopped session and re-anchors the clock so the next frame
    /// integrates nothing. Calling it twice in a row is the same as once.
    pub fn restart(&mut self) {
        self.state = self.initial;
        self.clock.reanchor();
        if self.phase == SchedulerPhase::Stopped {
            self.phase = SchedulerPhase::Scheduled;
        }
        tracing::debug!(law = self.law.name(), position = %self.state.position, "restart");
    }

    /// Replace the configuration and restart.
    ///
    /// # Errors
    ///
    /// Returns error if `config` fails validation; the session is unchanged.
    ///
    /// Commands still queued against the replaced configuration are dropped.
    pub fn apply_configuration(&mut self, config: SessionConfig) -> KinResult<()> {
        config.validate_all()?;

        let dropped = self.pending.len();
        self.pending.clear();
        if dropped > 0 {
            tracing::debug!(dropped, "stale panel commands discarded");
        }

        self.clock.set_time_scale(config.clock.time_scale);
        self.clock
            .set_max_real_delta_secs(config.clock.max_real_delta_secs);
        self.running = config.clock.running;
        self.display = config.display;
        self.config = config;
        self.rebuild_initial();

        tracing::debug!(demo = %self.config.demo.name, law = self.law.name(), "configuration applied");
        self.restart();
        Ok(())
    }

    fn integrate(&mut self, dt: f64) -> bool {
        let before = self.state;
        let candidate = self.law.advance(&before, dt);
        let (published, verdict) = self.guard.check(&before, candidate);
        self.state = published;

        match verdict {
            GuardVerdict::Accepted => {
                self.stats.updates += 1;
                self.config.termination.reached(&before, &self.state)
            }
            GuardVerdict::Rejected { .. } => {
                self.stats.frozen_frames += 1;
                false
            }
        }
    }

    fn drain_commands(&mut self) {
        while let Some(command) = self.pending.pop_front() {
            self.apply_command(command);
        }
    }

    fn apply_command(&mut self, command: PanelCommand) {
        match command {
            PanelCommand::CommitInitial { motion } => {
                let previous = self.config.motion;
                self.config.motion = motion;
                if let Err(err) = self.config.validate_all() {
                    tracing::warn!(%err, "initial values rejected");
                    self.config.motion = previous;
                    return;
                }
                self.rebuild_initial();
                self.restart();
            }
            PanelCommand::SetRunning { running } => self.set_running(running),
            PanelCommand::SetTimeScale { time_scale } => {
                self.config.clock.time_scale = time_scale;
                self.clock.set_time_scale(time_scale);
            }
            PanelCommand::SetDisplay { toggle, value } => {
                self.display.set(toggle, value);
                self.config.display.set(toggle, value);
            }
            PanelCommand::Restart => self.restart(),
        }
    }

    fn rebuild_initial(&mut self) {
        self.law = self.config.law();
        self.initial = self.config.initial_state();
        self.trajectory =
            self.config
                .sampler()
                .sample(&self.law, &self.initial, self.config.termination);
    }

    /// Run or pause the integrator.
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
        self.config.clock.running = running;
    }

    /// Whether the integrator runs on each step.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Live state.
    #[must_use]
    pub const fn state(&self) -> &KinematicState {
        &self.state
    }

    /// State a restart returns to.
    #[must_use]
    pub const fn initial_state(&self) -> &KinematicState {
        &self.initial
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Active motion law.
    #[must_use]
    pub const fn law(&self) -> &MotionLaw {
        &self.law
    }

    /// Scheduler phase.
    #[must_use]
    pub const fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    /// Whether the termination policy has stopped the session.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.phase == SchedulerPhase::Stopped
    }

    /// Frame counters.
    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Overlay path for the current initial values.
    #[must_use]
    pub const fn trajectory(&self) -> &TrajectoryPath {
        &self.trajectory
    }

    /// Overlay toggles.
    #[must_use]
    pub const fn display(&self) -> &DisplayToggles {
        &self.display
    }

    /// Frame clock.
    #[must_use]
    pub const fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Number of updates the state guard has discarded.
    #[must_use]
    pub const fn guard_trips(&self) -> u64 {
        self.guard.trips()
    }

    /// Commands queued for the next step.
    #[must_use]
    pub fn pending_commands(&self) -> usize {
        self.pending.len()
    }
}
