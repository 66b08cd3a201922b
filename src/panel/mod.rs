//! Parameter panel model.
//!
//! Describes the editable fields of a session (range, step, whether a commit
//! restarts the motion) and turns user edits into [`PanelCommand`]s. The
//! panel never touches live state; hosts hand the commands to
//! [`KinematicSession::submit`](crate::engine::KinematicSession::submit),
//! which applies them at the top of the next step.

use serde::{Deserialize, Serialize};

use crate::config::{DisplayToggle, MotionConfig, SessionConfig};
use crate::error::{KinError, KinResult};

/// Editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    /// Run/pause toggle.
    Running,
    /// Restart action.
    Restart,
    /// Time scale.
    TimeScale,
    /// Initial position X.
    PositionX,
    /// Initial position Y.
    PositionY,
    /// Initial velocity X.
    VelocityX,
    /// Initial velocity Y.
    VelocityY,
    /// Acceleration X.
    AccelerationX,
    /// Acceleration Y.
    AccelerationY,
    /// Circle radius.
    Radius,
    /// Revolution period.
    Period,
    /// Overlay toggle.
    Display(DisplayToggle),
}

/// Widget kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Boolean switch.
    Toggle,
    /// Bounded number moving in fixed steps.
    Number { min: f64, max: f64, step: f64 },
    /// Button.
    Action,
}

/// Declared field of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Which value the field edits.
    pub id: FieldId,
    /// Text shown next to the control.
    pub label: &'static str,
    /// Control type and numeric range.
    pub kind: FieldKind,
    /// Committing a new value restarts the motion.
    pub restart_on_commit: bool,
}

impl FieldSpec {
    const fn toggle(id: FieldId, label: &'static str) -> Self {
        Self {
            id,
            label,
            kind: FieldKind::Toggle,
            restart_on_commit: false,
        }
    }

    const fn initial(id: FieldId, label: &'static str, min: f64, max: f64, step: f64) -> Self {
        Self {
            id,
            label,
            kind: FieldKind::Number { min, max, step },
            restart_on_commit: true,
        }
    }

    /// Clamp `value` into range and snap it to the nearest step.
    ///
    /// # Errors
    ///
    /// Returns `KinError::FieldOutOfRange` for non-finite values and
    /// `KinError::Config` for fields that carry no number.
    pub fn normalize(&self, value: f64) -> KinResult<f64> {
        let FieldKind::Number { min, max, step } = self.kind else {
            return Err(KinError::config(format!("'{}' is not numeric", self.label)));
        };
        if !value.is_finite() {
            return Err(KinError::FieldOutOfRange {
                field: self.label.to_string(),
                value,
                min,
                max,
            });
        }
        let snapped = if step > 0.0 {
            min + ((value - min) / step).round() * step
        } else {
            value
        };
        // trims representation noise such as 0.6000000000000001
        let snapped = (snapped * 1e9).round() / 1e9;
        Ok(snapped.clamp(min, max))
    }
}

/// Current value of a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PanelValue {
    Bool(bool),
    Number(f64),
}

impl From<bool> for PanelValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PanelValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Edit handed from the panel to the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum PanelCommand {
    /// New initial values; restarts the motion.
    CommitInitial { motion: MotionConfig },
    /// Run or pause the integrator.
    SetRunning { running: bool },
    /// Change the time scale.
    SetTimeScale { time_scale: f64 },
    /// Flip an overlay toggle.
    SetDisplay { toggle: DisplayToggle, value: bool },
    /// Reset the motion to its initial values.
    Restart,
}

const DISPLAY_FIELDS: [(DisplayToggle, &str); 10] = [
    (DisplayToggle::Trajectory, "Trajectory"),
    (DisplayToggle::Position, "Position vector"),
    (DisplayToggle::PositionX, "Position component X"),
    (DisplayToggle::PositionY, "Position component Y"),
    (DisplayToggle::Velocity, "Velocity vector"),
    (DisplayToggle::VelocityX, "Velocity component X"),
    (DisplayToggle::VelocityY, "Velocity component Y"),
    (DisplayToggle::Acceleration, "Acceleration vector"),
    (DisplayToggle::AccelerationX, "Acceleration component X"),
    (DisplayToggle::AccelerationY, "Acceleration component Y"),
];

/// Panel state: the configuration values the user is editing.
#[derive(Debug, Clone)]
pub struct ParameterPanel {
    config: SessionConfig,
    fields: Vec<FieldSpec>,
}

impl ParameterPanel {
    /// Panel for the fields of `config`'s motion law.
    #[must_use]
    pub fn for_config(config: &SessionConfig) -> Self {
        Self {
            config: config.clone(),
            fields: field_specs(config),
        }
    }

    /// Replace the edited values, e.g. after the session loaded a new file.
    pub fn sync(&mut self, config: &SessionConfig) {
        *self = Self::for_config(config);
    }

    /// Values as currently edited.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Declared fields in display order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Spec of `id`.
    ///
    /// # Errors
    ///
    /// Returns `KinError::UnknownField` when the active law has no such field.
    pub fn spec(&self, id: FieldId) -> KinResult<&FieldSpec> {
        self.fields
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| KinError::UnknownField(format!("{id:?}")))
    }

    /// Current value of `id`; `None` for actions and absent fields.
    #[must_use]
    pub fn value(&self, id: FieldId) -> Option<PanelValue> {
        self.spec(id).ok()?;
        let config = &self.config;
        match id {
            FieldId::Restart => None,
            FieldId::Running => Some(config.clock.running.into()),
            FieldId::TimeScale => Some(config.clock.time_scale.into()),
            FieldId::Display(toggle) => Some(config.display.get(toggle).into()),
            _ => motion_value(&config.motion, id).map(PanelValue::Number),
        }
    }

    /// Commit a new value for `id`.
    ///
    /// Numbers are clamped to the declared range and snapped to the step.
    ///
    /// # Errors
    ///
    /// - `KinError::UnknownField` when the active law has no such field
    /// - `KinError::FieldOutOfRange` for non-finite numbers
    /// - `KinError::Config` when the value kind does not match the field
    pub fn commit(&mut self, id: FieldId, value: impl Into<PanelValue>) -> KinResult<PanelCommand> {
        let spec = *self.spec(id)?;
        let value = value.into();

        match (spec.kind, value) {
            (FieldKind::Action, _) => Ok(PanelCommand::Restart),
            (FieldKind::Toggle, PanelValue::Bool(on)) => Ok(self.set_toggle(id, on)),
            (FieldKind::Number { .. }, PanelValue::Number(raw)) => {
                let v = spec.normalize(raw)?;
                if id == FieldId::TimeScale {
                    self.config.clock.time_scale = v;
                    return Ok(PanelCommand::SetTimeScale { time_scale: v });
                }
                set_motion_value(&mut self.config.motion, id, v);
                Ok(PanelCommand::CommitInitial {
                    motion: self.config.motion,
                })
            }
            (_, other) => Err(KinError::config(format!(
                "'{}' does not accept {other:?}",
                spec.label
            ))),
        }
    }

    /// Move a field by whole steps; toggles flip, actions fire.
    ///
    /// # Errors
    ///
    /// Same as [`commit`](Self::commit).
    pub fn nudge(&mut self, id: FieldId, steps: i32) -> KinResult<PanelCommand> {
        let spec = *self.spec(id)?;
        match (spec.kind, self.value(id)) {
            (FieldKind::Number { step, .. }, Some(PanelValue::Number(current))) => {
                self.commit(id, current + f64::from(steps) * step)
            }
            (FieldKind::Toggle, Some(PanelValue::Bool(on))) => self.commit(id, !on),
            _ => self.commit(id, false),
        }
    }

    fn set_toggle(&mut self, id: FieldId, on: bool) -> PanelCommand {
        match id {
            FieldId::Running => {
                self.config.clock.running = on;
                PanelCommand::SetRunning { running: on }
            }
            FieldId::Display(toggle) => {
                self.config.display.set(toggle, on);
                PanelCommand::SetDisplay { toggle, value: on }
            }
            _ => PanelCommand::Restart,
        }
    }
}

fn field_specs(config: &SessionConfig) -> Vec<FieldSpec> {
    let width = config.viewport.width;
    let height = config.viewport.height;

    let mut fields = vec![
        FieldSpec::toggle(FieldId::Running, "Run"),
        FieldSpec {
            id: FieldId::Restart,
            label: "Restart",
            kind: FieldKind::Action,
            restart_on_commit: true,
        },
        FieldSpec {
            id: FieldId::TimeScale,
            label: "Time speed",
            kind: FieldKind::Number {
                min: 0.2,
                max: 10.0,
                step: 0.2,
            },
            restart_on_commit: false,
        },
    ];

    let position = [
        FieldSpec::initial(FieldId::PositionX, "Init position X", 0.0, width, 10.0),
        FieldSpec::initial(FieldId::PositionY, "Init position Y", 0.0, height, 10.0),
    ];
    let velocity = [
        FieldSpec::initial(FieldId::VelocityX, "Init speed X", 0.0, 300.0, 10.0),
        FieldSpec::initial(FieldId::VelocityY, "Init speed Y", 0.0, 300.0, 10.0),
    ];
    let acceleration = [
        FieldSpec::initial(FieldId::AccelerationX, "Init acceleration X", -50.0, 50.0, 5.0),
        FieldSpec::initial(FieldId::AccelerationY, "Init acceleration Y", -50.0, 50.0, 5.0),
    ];

    match config.motion {
        MotionConfig::ConstantAcceleration { .. } => {
            fields.extend(position);
            fields.extend(velocity);
            fields.extend(acceleration);
        }
        MotionConfig::UniformVelocity { .. } => {
            fields.extend(position);
            fields.extend(velocity);
        }
        MotionConfig::Circular { .. } => {
            fields.push(FieldSpec::initial(FieldId::Radius, "Radius", 0.0, 300.0, 10.0));
            fields.push(FieldSpec::initial(FieldId::Period, "Period", 1.0, 20.0, 1.0));
        }
    }

    fields.extend(
        DISPLAY_FIELDS
            .iter()
            .map(|&(toggle, label)| FieldSpec::toggle(FieldId::Display(toggle), label)),
    );
    fields
}

fn motion_value(motion: &MotionConfig, id: FieldId) -> Option<f64> {
    match (*motion, id) {
        (
            MotionConfig::ConstantAcceleration { position, .. }
            | MotionConfig::UniformVelocity { position, .. },
            FieldId::PositionX,
        ) => Some(position.x),
        (
            MotionConfig::ConstantAcceleration { position, .. }
            | MotionConfig::UniformVelocity { position, .. },
            FieldId::PositionY,
        ) => Some(position.y),
        (
            MotionConfig::ConstantAcceleration { velocity, .. }
            | MotionConfig::UniformVelocity { velocity, .. },
            FieldId::VelocityX,
        ) => Some(velocity.x),
        (
            MotionConfig::ConstantAcceleration { velocity, .. }
            | MotionConfig::UniformVelocity { velocity, .. },
            FieldId::VelocityY,
        ) => Some(velocity.y),
        (MotionConfig::ConstantAcceleration { acceleration, .. }, FieldId::AccelerationX) => {
            Some(acceleration.x)
        }
        (MotionConfig::ConstantAcceleration { acceleration, .. }, FieldId::AccelerationY) => {
            Some(acceleration.y)
        }
        (MotionConfig::Circular { radius, .. }, FieldId::Radius) => Some(radius),
        (MotionConfig::Circular { period, .. }, FieldId::Period) => Some(period),
        _ => None,
    }
}

fn set_motion_value(motion: &mut MotionConfig, id: FieldId, v: f64) {
    match (motion, id) {
        (
            MotionConfig::ConstantAcceleration { position, .. }
            | MotionConfig::UniformVelocity { position, .. },
            FieldId::PositionX,
        ) => position.x = v,
        (
            MotionConfig::ConstantAcceleration { position, .. }
            | MotionConfig::UniformVelocity { position, .. },
            FieldId::PositionY,
        ) => position.y = v,
        (
            MotionConfig::ConstantAcceleration { velocity, .. }
            | MotionConfig::UniformVelocity { velocity, .. },
            FieldId::VelocityX,
        ) => velocity.x = v,
        (
            MotionConfig::ConstantAcceleration { velocity, .. }
            | MotionConfig::UniformVelocity { velocity, .. },
            FieldId::VelocityY,
        ) => velocity.y = v,
        (MotionConfig::ConstantAcceleration { acceleration, .. }, FieldId::AccelerationX) => {
            acceleration.x = v;
        }
        (MotionConfig::ConstantAcceleration { acceleration, .. }, FieldId::AccelerationY) => {
            acceleration.y = v;
        }
        (MotionConfig::Circular { radius, .. }, FieldId::Radius) => *radius = v,
        (MotionConfig::Circular { period, .. }, FieldId::Period) => *period = v,
        _ => {}
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::DemoPreset;
    use crate::engine::state::Vec2;

    fn projectile_panel() -> ParameterPanel {
        ParameterPanel::for_config(&DemoPreset::Projectile.config())
    }

    #[test]
    fn test_fields_follow_law() {
        let panel = projectile_panel();
        assert!(panel.spec(FieldId::AccelerationY).is_ok());
        assert!(panel.spec(FieldId::Radius).is_err());

        let circular = ParameterPanel::for_config(&DemoPreset::Circular.config());
        assert!(circular.spec(FieldId::Period).is_ok());
        assert!(circular.spec(FieldId::PositionX).is_err());

        let uniform = ParameterPanel::for_config(&DemoPreset::Uniform.config());
        assert!(uniform.spec(FieldId::VelocityX).is_ok());
        assert!(uniform.spec(FieldId::AccelerationX).is_err());
    }

    #[test]
    fn test_position_range_tracks_stage() {
        let panel = projectile_panel();
        let spec = panel.spec(FieldId::PositionY).unwrap();
        assert_eq!(
            spec.kind,
            FieldKind::Number {
                min: 0.0,
                max: 800.0,
                step: 10.0
            }
        );
        assert!(spec.restart_on_commit);
    }

    #[test]
    fn test_commit_initial_value() {
        let mut panel = projectile_panel();
        let cmd = panel.commit(FieldId::VelocityY, 150.0).unwrap();

        assert_eq!(
            cmd,
            PanelCommand::CommitInitial {
                motion: MotionConfig::ConstantAcceleration {
                    position: Vec2::zero(),
                    velocity: Vec2::new(100.0, 150.0),
                    acceleration: Vec2::new(0.0, -20.0),
                }
            }
        );
        assert_eq!(panel.value(FieldId::VelocityY), Some(PanelValue::Number(150.0)));
    }

    #[test]
    fn test_commit_clamps_and_snaps() {
        let mut panel = projectile_panel();
        panel.commit(FieldId::VelocityX, 1000.0).unwrap();
        assert_eq!(panel.value(FieldId::VelocityX), Some(PanelValue::Number(300.0)));

        panel.commit(FieldId::AccelerationY, -23.0).unwrap();
        assert_eq!(panel.value(FieldId::AccelerationY), Some(PanelValue::Number(-25.0)));

        let cmd = panel.commit(FieldId::TimeScale, 0.61).unwrap();
        assert_eq!(cmd, PanelCommand::SetTimeScale { time_scale: 0.6 });

        let cmd = panel.commit(FieldId::TimeScale, 0.0).unwrap();
        assert_eq!(cmd, PanelCommand::SetTimeScale { time_scale: 0.2 });
    }

    #[test]
    fn test_commit_rejects_nan() {
        let mut panel = projectile_panel();
        let err = panel.commit(FieldId::PositionX, f64::NAN).unwrap_err();
        assert!(matches!(err, KinError::FieldOutOfRange { .. }));
    }

    #[test]
    fn test_commit_rejects_wrong_kind() {
        let mut panel = projectile_panel();
        assert!(panel.commit(FieldId::Running, 1.0).is_err());
        assert!(panel.commit(FieldId::PositionX, true).is_err());
        assert!(matches!(
            panel.commit(FieldId::Radius, 10.0),
            Err(KinError::UnknownField(_))
        ));
    }

    #[test]
    fn test_toggles_and_actions() {
        let mut panel = projectile_panel();
        assert_eq!(
            panel.commit(FieldId::Running, false).unwrap(),
            PanelCommand::SetRunning { running: false }
        );
        assert_eq!(
            panel
                .commit(FieldId::Display(DisplayToggle::Velocity), true)
                .unwrap(),
            PanelCommand::SetDisplay {
                toggle: DisplayToggle::Velocity,
                value: true
            }
        );
        assert!(panel.config().display.velocity);
        assert_eq!(
            panel.commit(FieldId::Restart, true).unwrap(),
            PanelCommand::Restart
        );
    }

    #[test]
    fn test_nudge() {
        let mut panel = ParameterPanel::for_config(&DemoPreset::Circular.config());
        panel.nudge(FieldId::Period, 3).unwrap();
        assert_eq!(panel.value(FieldId::Period), Some(PanelValue::Number(13.0)));

        panel.nudge(FieldId::Period, -100).unwrap();
        assert_eq!(panel.value(FieldId::Period), Some(PanelValue::Number(1.0)));

        let cmd = panel.nudge(FieldId::Running, 1).unwrap();
        assert_eq!(cmd, PanelCommand::SetRunning { running: true });

        assert_eq!(panel.nudge(FieldId::Restart, 1).unwrap(), PanelCommand::Restart);
    }

    #[test]
    fn test_sync_rebuilds_fields() {
        let mut panel = projectile_panel();
        panel.sync(&DemoPreset::Circular.config());
        assert!(panel.spec(FieldId::Radius).is_ok());
        assert_eq!(panel.value(FieldId::Running), Some(PanelValue::Bool(false)));
    }
}
