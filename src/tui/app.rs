//! Kinematics TUI application state and logic.
//!
//! Key handling, panel focus and the session live here; the binary only
//! reads the terminal and paints [`KinematicsApp::frame`].

use std::time::Instant;

use crossterm::event::KeyCode;

use crate::config::{DemoPreset, SessionConfig};
use crate::engine::{FrameDriver, KinematicSession, StepOutcome};
use crate::error::KinResult;
use crate::panel::{FieldId, FieldSpec, PanelCommand, PanelValue, ParameterPanel};
use crate::render::{CommandRecorder, RenderCommand, Viewport};

/// Frame timestamps from the wall clock, in milliseconds since creation.
#[derive(Debug, Clone, Copy)]
pub struct WallClockDriver {
    start: Instant,
}

impl WallClockDriver {
    /// Start counting now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for WallClockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDriver for WallClockDriver {
    fn next_timestamp(&mut self) -> Option<f64> {
        Some(self.start.elapsed().as_secs_f64() * 1000.0)
    }
}

/// Application state for the kinematics TUI.
pub struct KinematicsApp {
    /// Simulation context.
    pub session: KinematicSession,
    /// Values the user is editing.
    pub panel: ParameterPanel,
    /// Last rendered frame.
    recorder: CommandRecorder,
    /// Index of the focused panel field.
    focus: usize,
    /// Outcome of the last step.
    pub last_outcome: StepOutcome,
    /// Last panel error, shown in the status line.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl KinematicsApp {
    /// Create an app for `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration fails validation.
    pub fn new(config: SessionConfig) -> KinResult<Self> {
        let recorder = CommandRecorder::new(Viewport::from_config(&config.viewport));
        let panel = ParameterPanel::for_config(&config);
        Ok(Self {
            session: KinematicSession::new(config)?,
            panel,
            recorder,
            focus: 0,
            last_outcome: StepOutcome::Continue,
            status: None,
            should_quit: false,
        })
    }

    /// Create an app for a built-in preset.
    ///
    /// # Errors
    ///
    /// Returns error if the preset fails validation.
    pub fn from_preset(preset: DemoPreset) -> KinResult<Self> {
        Self::new(preset.config())
    }

    /// Run one frame at `timestamp_ms`.
    pub fn update(&mut self, timestamp_ms: f64) -> StepOutcome {
        self.last_outcome = self.session.step(timestamp_ms, &mut self.recorder);
        self.last_outcome
    }

    /// Last presented frame in screen coordinates.
    #[must_use]
    pub fn frame(&self) -> &[RenderCommand] {
        self.recorder.frame()
    }

    /// Viewport the frame was recorded with.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        self.recorder.viewport()
    }

    /// Focused panel field.
    #[must_use]
    pub fn focused(&self) -> Option<&FieldSpec> {
        self.panel.fields().get(self.focus)
    }

    /// Index of the focused panel field.
    #[must_use]
    pub const fn focus_index(&self) -> usize {
        self.focus
    }

    /// Display text for a field value.
    #[must_use]
    pub fn value_text(&self, id: FieldId) -> String {
        match self.panel.value(id) {
            Some(PanelValue::Bool(true)) => "[x]".to_string(),
            Some(PanelValue::Bool(false)) => "[ ]".to_string(),
            Some(PanelValue::Number(v)) => format!("{v}"),
            None => String::new(),
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.edit(FieldId::Running, 1),
            KeyCode::Char('r') => self.edit(FieldId::Restart, 1),
            KeyCode::Up | KeyCode::Char('k') => self.move_focus(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_focus(1),
            KeyCode::Left | KeyCode::Char('-') => self.edit_focused(-1),
            KeyCode::Right | KeyCode::Char('+' | '=') | KeyCode::Enter => self.edit_focused(1),
            KeyCode::Char(c @ '1'..='4') => {
                let index = (c as usize) - ('1' as usize);
                if let Some(preset) = DemoPreset::ALL.get(index) {
                    self.load(preset.config());
                }
            }
            _ => {}
        }
    }

    /// Replace the configuration, e.g. when switching demos.
    pub fn load(&mut self, config: SessionConfig) {
        let viewport = Viewport::from_config(&config.viewport);
        match self.session.apply_configuration(config) {
            Ok(()) => {
                self.panel.sync(self.session.config());
                self.recorder.set_viewport(viewport);
                self.focus = 0;
                self.status = None;
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    fn move_focus(&mut self, by: isize) {
        let len = self.panel.fields().len();
        if len == 0 {
            return;
        }
        self.focus = self.focus.saturating_add_signed(by).min(len - 1);
    }

    fn edit_focused(&mut self, steps: i32) {
        if let Some(id) = self.focused().map(|f| f.id) {
            self.edit(id, steps);
        }
    }

    fn edit(&mut self, id: FieldId, steps: i32) {
        match self.panel.nudge(id, steps) {
            Ok(command) => self.submit(command),
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    fn submit(&mut self, command: PanelCommand) {
        self.status = None;
        self.session.submit(command);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::DisplayToggle;
    use crate::engine::Vec2;

    fn app(preset: DemoPreset) -> KinematicsApp {
        KinematicsApp::from_preset(preset).unwrap()
    }

    #[test]
    fn test_quit_keys() {
        let mut a = app(DemoPreset::Projectile);
        a.handle_key(KeyCode::Char('q'));
        assert!(a.should_quit);

        let mut b = app(DemoPreset::Projectile);
        b.handle_key(KeyCode::Esc);
        assert!(b.should_quit);
    }

    #[test]
    fn test_space_toggles_running_on_next_frame() {
        let mut a = app(DemoPreset::Circular);
        assert!(!a.session.is_running());

        a.handle_key(KeyCode::Char(' '));
        assert!(!a.session.is_running());
        a.update(0.0);
        assert!(a.session.is_running());

        a.update(1000.0);
        assert!(a.session.state().sim_time > 0.0);
    }

    #[test]
    fn test_focus_moves_and_clamps() {
        let mut a = app(DemoPreset::Projectile);
        a.handle_key(KeyCode::Up);
        assert_eq!(a.focus_index(), 0);

        for _ in 0..100 {
            a.handle_key(KeyCode::Down);
        }
        assert_eq!(a.focus_index(), a.panel.fields().len() - 1);
    }

    #[test]
    fn test_edit_focused_initial_value() {
        let mut a = app(DemoPreset::Projectile);
        while a.focused().map(|f| f.id) != Some(FieldId::VelocityY) {
            a.handle_key(KeyCode::Down);
        }
        a.handle_key(KeyCode::Right);
        a.update(0.0);

        assert_eq!(a.session.initial_state().velocity, Vec2::new(100.0, 110.0));
        assert_eq!(a.value_text(FieldId::VelocityY), "110");
    }

    #[test]
    fn test_toggle_display_with_enter() {
        let mut a = app(DemoPreset::Projectile);
        let target = FieldId::Display(DisplayToggle::Trajectory);
        while a.focused().map(|f| f.id) != Some(target) {
            a.handle_key(KeyCode::Down);
        }
        a.handle_key(KeyCode::Enter);
        a.update(0.0);

        assert!(a.session.display().trajectory);
        assert!(a
            .frame()
            .iter()
            .any(|c| matches!(c, RenderCommand::DrawPath { .. })));
    }

    #[test]
    fn test_restart_key() {
        let mut a = app(DemoPreset::Uniform);
        a.update(0.0);
        a.update(50.0);
        assert_ne!(a.session.state(), a.session.initial_state());

        a.handle_key(KeyCode::Char('r'));
        a.update(100.0);
        assert_eq!(a.session.state(), a.session.initial_state());
    }

    #[test]
    fn test_switch_preset() {
        let mut a = app(DemoPreset::Projectile);
        a.handle_key(KeyCode::Char('4'));

        assert!(a.session.law().is_closed_form());
        assert!(a.panel.spec(FieldId::Radius).is_ok());
        assert_eq!(a.viewport().origin_on_screen(), (600.0, 400.0));
    }

    #[test]
    fn test_frame_recorded_each_update() {
        let mut a = app(DemoPreset::Projectile);
        assert!(a.frame().is_empty());
        a.update(0.0);
        assert_eq!(a.frame().first(), Some(&RenderCommand::Clear {
            color: crate::render::Color::BLACK
        }));
        assert_eq!(a.frame().last(), Some(&RenderCommand::Present));
    }

    #[test]
    fn test_wall_clock_driver_monotonic() {
        let mut driver = WallClockDriver::new();
        let a = driver.next_timestamp().unwrap();
        let b = driver.next_timestamp().unwrap();
        assert!(b >= a);
    }
}
