//! Session configuration with YAML schema and validation.
//!
//! Mistake-proofing happens in two passes:
//! - schema validation through `validator` derives
//! - semantic validation of cross-field and numeric constraints
//!
//! The configuration holds the *initial* values; a restart copies them into
//! the live kinematic state.

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::engine::integrator::{circular_state, MotionLaw};
use crate::engine::scheduler::TerminationPolicy;
use crate::engine::state::{KinematicState, Vec2};
use crate::engine::trajectory::{TrajectorySampler, DEFAULT_HORIZON_SECS, DEFAULT_INTERVALS};
use crate::error::{KinError, KinResult};

/// Top-level session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Demo metadata.
    #[serde(default)]
    pub demo: DemoMeta,

    /// Motion law and its initial values.
    pub motion: MotionConfig,

    /// When the frame loop stops rescheduling.
    #[serde(default)]
    pub termination: TerminationPolicy,

    /// Run state and time scaling.
    #[validate(nested)]
    #[serde(default)]
    pub clock: ClockConfig,

    /// Overlay toggles.
    #[serde(default)]
    pub display: DisplayToggles,

    /// Stage geometry.
    #[validate(nested)]
    #[serde(default)]
    pub viewport: ViewportConfig,

    /// Trajectory overlay sampling.
    #[validate(nested)]
    #[serde(default)]
    pub trajectory: TrajectoryConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl SessionConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> KinResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> KinResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> KinResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first failing constraint.
    pub fn validate_all(&self) -> KinResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    /// Configuration of a built-in demo.
    #[must_use]
    pub fn preset(preset: DemoPreset) -> Self {
        preset.config()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> KinResult<()> {
        self.motion.validate_values()?;

        let time_scale = self.clock.time_scale;
        if !time_scale.is_finite() || time_scale < 0.0 {
            return Err(KinError::config(format!(
                "time_scale must be finite and non-negative, got {time_scale}"
            )));
        }

        if let Some(max) = self.clock.max_real_delta_secs {
            if !max.is_finite() || max <= 0.0 {
                return Err(KinError::config("max_real_delta_secs must be positive"));
            }
        }

        if !(0.0..0.5).contains(&self.viewport.padding) {
            return Err(KinError::config("viewport padding must be in [0, 0.5)"));
        }

        let horizon = self.trajectory.horizon_secs;
        if !horizon.is_finite() || horizon <= 0.0 {
            return Err(KinError::config("trajectory horizon_secs must be positive"));
        }

        if self.termination == TerminationPolicy::GroundContact
            && !matches!(self.motion, MotionConfig::ConstantAcceleration { .. })
        {
            return Err(KinError::config(
                "ground_contact termination requires the constant_acceleration law",
            ));
        }

        Ok(())
    }

    /// Motion law selected by this configuration.
    #[must_use]
    pub const fn law(&self) -> MotionLaw {
        self.motion.law()
    }

    /// Kinematic state a restart produces.
    #[must_use]
    pub fn initial_state(&self) -> KinematicState {
        self.motion.initial_state()
    }

    /// Trajectory sampler configured for this session.
    #[must_use]
    pub const fn sampler(&self) -> TrajectorySampler {
        TrajectorySampler::new(self.trajectory.intervals, self.trajectory.horizon_secs)
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    preset: Option<DemoPreset>,
    motion: Option<MotionConfig>,
    termination: Option<TerminationPolicy>,
    running: Option<bool>,
    time_scale: Option<f64>,
    max_real_delta_secs: Option<Option<f64>>,
    display: Option<DisplayToggles>,
}

impl SessionConfigBuilder {
    /// Start from a preset instead of the projectile default.
    #[must_use]
    pub const fn preset(mut self, preset: DemoPreset) -> Self {
        self.preset = Some(preset);
        self
    }

    /// Set the motion law and initial values.
    #[must_use]
    pub const fn motion(mut self, motion: MotionConfig) -> Self {
        self.motion = Some(motion);
        self
    }

    /// Set the termination policy.
    #[must_use]
    pub const fn termination(mut self, termination: TerminationPolicy) -> Self {
        self.termination = Some(termination);
        self
    }

    /// Set the initial run state.
    #[must_use]
    pub const fn running(mut self, running: bool) -> Self {
        self.running = Some(running);
        self
    }

    /// Set the time scale.
    #[must_use]
    pub const fn time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = Some(time_scale);
        self
    }

    /// Set or remove the real-time gap clamp.
    #[must_use]
    pub const fn max_real_delta_secs(mut self, max: Option<f64>) -> Self {
        self.max_real_delta_secs = Some(max);
        self
    }

    /// Set the overlay toggles.
    #[must_use]
    pub const fn display(mut self, display: DisplayToggles) -> Self {
        self.display = Some(display);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> SessionConfig {
        let mut config = self.preset.unwrap_or_default().config();

        if let Some(motion) = self.motion {
            config.motion = motion;
        }
        if let Some(termination) = self.termination {
            config.termination = termination;
        }
        if let Some(running) = self.running {
            config.clock.running = running;
        }
        if let Some(time_scale) = self.time_scale {
            config.clock.time_scale = time_scale;
        }
        if let Some(max) = self.max_real_delta_secs {
            config.clock.max_real_delta_secs = max;
        }
        if let Some(display) = self.display {
            config.display = display;
        }

        config
    }
}

/// Demo metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemoMeta {
    /// Demo name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
}

/// Motion law with its initial values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "law", rename_all = "snake_case", deny_unknown_fields)]
pub enum MotionConfig {
    /// Projectile / uniformly accelerated motion.
    ConstantAcceleration {
        /// Initial position.
        position: Vec2,
        /// Initial velocity.
        velocity: Vec2,
        /// Constant acceleration.
        acceleration: Vec2,
    },
    /// Straight-line motion at constant velocity.
    UniformVelocity {
        /// Initial position.
        position: Vec2,
        /// Constant velocity.
        velocity: Vec2,
    },
    /// Uniform circular motion around the origin.
    Circular {
        /// Circle radius.
        radius: f64,
        /// Revolution period in seconds.
        period: f64,
    },
}

impl MotionConfig {
    /// Motion law for these values.
    #[must_use]
    pub const fn law(&self) -> MotionLaw {
        match *self {
            Self::ConstantAcceleration { .. } => MotionLaw::ConstantAcceleration,
            Self::UniformVelocity { .. } => MotionLaw::UniformVelocity,
            Self::Circular { radius, period } => MotionLaw::ClosedFormCircular { radius, period },
        }
    }

    /// State at `sim_time = 0`.
    #[must_use]
    pub fn initial_state(&self) -> KinematicState {
        match *self {
            Self::ConstantAcceleration {
                position,
                velocity,
                acceleration,
            } => KinematicState::new(position, velocity, acceleration),
            Self::UniformVelocity { position, velocity } => {
                KinematicState::new(position, velocity, Vec2::zero())
            }
            Self::Circular { radius, period } => circular_state(radius, period, 0.0),
        }
    }

    fn validate_values(&self) -> KinResult<()> {
        match *self {
            Self::ConstantAcceleration {
                position,
                velocity,
                acceleration,
            } => {
                finite_vec("position", position)?;
                finite_vec("velocity", velocity)?;
                finite_vec("acceleration", acceleration)
            }
            Self::UniformVelocity { position, velocity } => {
                finite_vec("position", position)?;
                finite_vec("velocity", velocity)
            }
            Self::Circular { radius, period } => {
                if !radius.is_finite() || radius < 0.0 {
                    return Err(KinError::config(format!(
                        "radius must be finite and non-negative, got {radius}"
                    )));
                }
                if !period.is_finite() || period <= 0.0 {
                    return Err(KinError::config(format!(
                        "period must be positive, got {period}"
                    )));
                }
                Ok(())
            }
        }
    }
}

fn finite_vec(name: &str, v: Vec2) -> KinResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(KinError::config(format!("{name} must be finite, got {v}")))
    }
}

/// Run state and time scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct ClockConfig {
    /// Whether the integrator runs.
    #[serde(default = "default_true")]
    pub running: bool,
    /// Simulated seconds per real second.
    #[validate(range(min = 0.0))]
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    /// Clamp on the real delta of a single frame; `null` disables it.
    #[serde(default = "default_max_real_delta")]
    pub max_real_delta_secs: Option<f64>,
}

const fn default_true() -> bool {
    true
}

const fn default_time_scale() -> f64 {
    1.0
}

#[allow(clippy::unnecessary_wraps)]
const fn default_max_real_delta() -> Option<f64> {
    Some(0.1)
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            running: true,
            time_scale: default_time_scale(),
            max_real_delta_secs: default_max_real_delta(),
        }
    }
}

/// Overlay toggles.
///
/// Component toggles only take effect while their parent vector is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayToggles {
    /// Position vector from the origin.
    pub position: bool,
    /// Dashed X component of the position.
    pub position_x: bool,
    /// Dashed Y component of the position.
    pub position_y: bool,
    /// Velocity vector from the point.
    pub velocity: bool,
    /// Dashed X component of the velocity.
    pub velocity_x: bool,
    /// Dashed Y component of the velocity.
    pub velocity_y: bool,
    /// Acceleration vector from the point.
    pub acceleration: bool,
    /// Dashed X component of the acceleration.
    pub acceleration_x: bool,
    /// Dashed Y component of the acceleration.
    pub acceleration_y: bool,
    /// Trajectory overlay.
    pub trajectory: bool,
}

/// Addressable overlay toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayToggle {
    /// [`DisplayToggles::position`]
    Position,
    /// [`DisplayToggles::position_x`]
    PositionX,
    /// [`DisplayToggles::position_y`]
    PositionY,
    /// [`DisplayToggles::velocity`]
    Velocity,
    /// [`DisplayToggles::velocity_x`]
    VelocityX,
    /// [`DisplayToggles::velocity_y`]
    VelocityY,
    /// [`DisplayToggles::acceleration`]
    Acceleration,
    /// [`DisplayToggles::acceleration_x`]
    AccelerationX,
    /// [`DisplayToggles::acceleration_y`]
    AccelerationY,
    /// [`DisplayToggles::trajectory`]
    Trajectory,
}

impl DisplayToggles {
    /// Everything on.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            position: true,
            position_x: true,
            position_y: true,
            velocity: true,
            velocity_x: true,
            velocity_y: true,
            acceleration: true,
            acceleration_x: true,
            acceleration_y: true,
            trajectory: true,
        }
    }

    fn slot(&mut self, toggle: DisplayToggle) -> &mut bool {
        match toggle {
            DisplayToggle::Position => &mut self.position,
            DisplayToggle::PositionX => &mut self.position_x,
            DisplayToggle::PositionY => &mut self.position_y,
            DisplayToggle::Velocity => &mut self.velocity,
            DisplayToggle::VelocityX => &mut self.velocity_x,
            DisplayToggle::VelocityY => &mut self.velocity_y,
            DisplayToggle::Acceleration => &mut self.acceleration,
            DisplayToggle::AccelerationX => &mut self.acceleration_x,
            DisplayToggle::AccelerationY => &mut self.acceleration_y,
            DisplayToggle::Trajectory => &mut self.trajectory,
        }
    }

    /// Read one toggle.
    #[must_use]
    pub fn get(&self, toggle: DisplayToggle) -> bool {
        let mut copy = *self;
        *copy.slot(toggle)
    }

    /// Write one toggle.
    pub fn set(&mut self, toggle: DisplayToggle, value: bool) {
        *self.slot(toggle) = value;
    }
}

/// Where the world origin sits on the stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginPlacement {
    /// Bottom-left corner, inset by the padding.
    #[default]
    BottomLeft,
    /// Stage centre.
    Center,
}

/// Stage geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct ViewportConfig {
    /// Stage width in display units.
    #[validate(range(min = 1.0))]
    #[serde(default = "default_width")]
    pub width: f64,
    /// Stage height in display units.
    #[validate(range(min = 1.0))]
    #[serde(default = "default_height")]
    pub height: f64,
    /// Fraction of the stage kept as margin around the origin.
    #[serde(default = "default_padding")]
    pub padding: f64,
    /// Origin placement.
    #[serde(default)]
    pub origin: OriginPlacement,
}

const fn default_width() -> f64 {
    1200.0
}

const fn default_height() -> f64 {
    800.0
}

const fn default_padding() -> f64 {
    0.1
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            padding: default_padding(),
            origin: OriginPlacement::default(),
        }
    }
}

/// Trajectory overlay sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct TrajectoryConfig {
    /// Number of sampling intervals.
    #[validate(range(min = 1, max = 10_000))]
    #[serde(default = "default_intervals")]
    pub intervals: usize,
    /// Sampled span for paths that never land.
    #[serde(default = "default_horizon")]
    pub horizon_secs: f64,
}

const fn default_intervals() -> usize {
    DEFAULT_INTERVALS
}

const fn default_horizon() -> f64 {
    DEFAULT_HORIZON_SECS
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            intervals: default_intervals(),
            horizon_secs: default_horizon(),
        }
    }
}

/// Built-in demo variants.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum DemoPreset {
    /// Projectile launched from the ground, stops on landing.
    #[default]
    Projectile,
    /// Constant velocity along X.
    Uniform,
    /// Constant acceleration along X.
    Accelerated,
    /// Uniform circular motion.
    Circular,
}

impl DemoPreset {
    /// All presets in display order.
    pub const ALL: [Self; 4] = [
        Self::Projectile,
        Self::Uniform,
        Self::Accelerated,
        Self::Circular,
    ];

    /// Preset identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Projectile => "projectile",
            Self::Uniform => "uniform",
            Self::Accelerated => "accelerated",
            Self::Circular => "circular",
        }
    }

    /// Full configuration for this preset.
    #[must_use]
    pub fn config(self) -> SessionConfig {
        let (description, motion, termination, running, origin) = match self {
            Self::Projectile => (
                "Point launched under constant downward acceleration",
                MotionConfig::ConstantAcceleration {
                    position: Vec2::zero(),
                    velocity: Vec2::new(100.0, 100.0),
                    acceleration: Vec2::new(0.0, -20.0),
                },
                TerminationPolicy::GroundContact,
                true,
                OriginPlacement::BottomLeft,
            ),
            Self::Uniform => (
                "Point moving in a straight line at constant speed",
                MotionConfig::UniformVelocity {
                    position: Vec2::new(0.0, 300.0),
                    velocity: Vec2::new(100.0, 0.0),
                },
                TerminationPolicy::Never,
                true,
                OriginPlacement::BottomLeft,
            ),
            Self::Accelerated => (
                "Point speeding up along a straight line",
                MotionConfig::ConstantAcceleration {
                    position: Vec2::new(0.0, 300.0),
                    velocity: Vec2::new(20.0, 0.0),
                    acceleration: Vec2::new(15.0, 0.0),
                },
                TerminationPolicy::Never,
                true,
                OriginPlacement::BottomLeft,
            ),
            Self::Circular => (
                "Point on a circle at constant angular velocity",
                MotionConfig::Circular {
                    radius: 150.0,
                    period: 10.0,
                },
                TerminationPolicy::Never,
                false,
                OriginPlacement::Center,
            ),
        };

        SessionConfig {
            schema_version: default_schema_version(),
            demo: DemoMeta {
                name: self.name().to_string(),
                description: description.to_string(),
            },
            motion,
            termination,
            clock: ClockConfig {
                running,
                time_scale: 0.4,
                max_real_delta_secs: default_max_real_delta(),
            },
            display: DisplayToggles::default(),
            viewport: ViewportConfig {
                origin,
                ..ViewportConfig::default()
            },
            trajectory: TrajectoryConfig::default(),
        }
    }
}

impl std::fmt::Display for DemoPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for DemoPreset {
    type Err = KinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| KinError::config(format!("unknown preset '{s}'")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const PROJECTILE_YAML: &str = r#"
schema_version: "1.0"
demo:
  name: projectile
motion:
  law: constant_acceleration
  position: { x: 0.0, y: 0.0 }
  velocity: { x: 100.0, y: 100.0 }
  acceleration: { x: 0.0, y: -20.0 }
termination: ground_contact
clock:
  running: true
  time_scale: 0.4
display:
  velocity: true
  trajectory: true
"#;

    #[test]
    fn test_yaml_parse() {
        let config = SessionConfig::from_yaml(PROJECTILE_YAML).unwrap();

        assert_eq!(config.law(), MotionLaw::ConstantAcceleration);
        assert_eq!(config.termination, TerminationPolicy::GroundContact);
        assert!((config.clock.time_scale - 0.4).abs() < f64::EPSILON);
        assert_eq!(config.clock.max_real_delta_secs, Some(0.1));
        assert!(config.display.velocity);
        assert!(!config.display.position);
        assert_eq!(config.viewport.origin, OriginPlacement::BottomLeft);
        assert_eq!(config.trajectory.intervals, 20);
    }

    #[test]
    fn test_yaml_null_clamp_disables_it() {
        let yaml = r"
motion:
  law: uniform_velocity
  position: { x: 0.0, y: 300.0 }
  velocity: { x: 100.0, y: 0.0 }
clock:
  max_real_delta_secs: null
";
        let config = SessionConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.clock.max_real_delta_secs, None);
        assert!(config.clock.running);
    }

    #[test]
    fn test_yaml_circular() {
        let yaml = r"
motion:
  law: circular
  radius: 150.0
  period: 10.0
viewport:
  origin: center
";
        let config = SessionConfig::from_yaml(yaml).unwrap();
        let state = config.initial_state();
        assert!((state.position.x - 150.0).abs() < 1e-12);
        assert_eq!(config.viewport.origin, OriginPlacement::Center);
    }

    #[test]
    fn test_yaml_rejects_unknown_fields() {
        let yaml = r"
motion:
  law: circular
  radius: 150.0
  period: 10.0
gravity: 9.81
";
        assert!(matches!(
            SessionConfig::from_yaml(yaml),
            Err(KinError::YamlParse(_))
        ));
    }

    #[test]
    fn test_validation_rejects_zero_period() {
        let yaml = r"
motion:
  law: circular
  radius: 150.0
  period: 0.0
";
        let err = SessionConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("period"));
    }

    #[test]
    fn test_validation_rejects_negative_time_scale() {
        let config = SessionConfig::builder().time_scale(-1.0).build();
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_validation_accepts_zero_time_scale() {
        let config = SessionConfig::builder().time_scale(0.0).build();
        assert!(config.validate_all().is_ok());
    }

    #[test]
    fn test_validation_rejects_ground_contact_on_circle() {
        let config = SessionConfig::builder()
            .preset(DemoPreset::Circular)
            .termination(TerminationPolicy::GroundContact)
            .build();
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_padding() {
        let mut config = SessionConfig::default_projectile();
        config.viewport.padding = 0.5;
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_intervals() {
        let mut config = SessionConfig::default_projectile();
        config.trajectory.intervals = 0;
        assert!(matches!(
            config.validate_all(),
            Err(KinError::Validation(_))
        ));
    }

    #[test]
    fn test_presets_validate() {
        for preset in DemoPreset::ALL {
            let config = preset.config();
            assert!(config.validate_all().is_ok(), "{preset} failed validation");
            assert_eq!(config.demo.name, preset.name());
        }
    }

    #[test]
    fn test_circular_preset_starts_paused() {
        let config = DemoPreset::Circular.config();
        assert!(!config.clock.running);
        assert_eq!(config.viewport.origin, OriginPlacement::Center);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("circular".parse::<DemoPreset>().ok(), Some(DemoPreset::Circular));
        assert_eq!(" Projectile ".parse::<DemoPreset>().ok(), Some(DemoPreset::Projectile));
        assert!("orbit".parse::<DemoPreset>().is_err());
    }

    #[test]
    fn test_yaml_roundtrip_preserves_preset() {
        let config = DemoPreset::Accelerated.config();
        let yaml = config.to_yaml().unwrap();
        let parsed = SessionConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_builder_overrides() {
        let config = SessionConfig::builder()
            .preset(DemoPreset::Uniform)
            .running(false)
            .time_scale(2.0)
            .max_real_delta_secs(None)
            .build();

        assert_eq!(config.law(), MotionLaw::UniformVelocity);
        assert!(!config.clock.running);
        assert!((config.clock.time_scale - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.clock.max_real_delta_secs, None);
    }

    #[test]
    fn test_display_toggle_access() {
        let mut toggles = DisplayToggles::default();
        toggles.set(DisplayToggle::VelocityY, true);
        assert!(toggles.get(DisplayToggle::VelocityY));
        assert!(!toggles.get(DisplayToggle::Velocity));
        assert!(DisplayToggles::all().get(DisplayToggle::Trajectory));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projectile.yaml");
        std::fs::write(&path, PROJECTILE_YAML).unwrap();

        let config = SessionConfig::load(&path).unwrap();
        assert_eq!(config.demo.name, "projectile");

        let missing = SessionConfig::load(dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(KinError::Io(_))));
    }

    impl SessionConfig {
        fn default_projectile() -> Self {
            DemoPreset::Projectile.config()
        }
    }
}
