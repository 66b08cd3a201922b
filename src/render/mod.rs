//! Platform-agnostic scene composition.
//!
//! The session talks to a [`SceneComposer`] in world coordinates (Y up).
//! [`CommandRecorder`] maps them through a [`Viewport`] into screen-space
//! [`RenderCommand`]s (Y down), so the same frame can be painted by a
//! terminal canvas, serialized to JSON, or asserted on in tests.

use serde::{Deserialize, Serialize};

use crate::config::{DisplayToggles, OriginPlacement, ViewportConfig};
use crate::engine::state::{KinematicState, Vec2};
use crate::engine::trajectory::TrajectoryPath;

/// Radius of the drawn point in display units.
pub const POINT_RADIUS: f64 = 8.0;

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Create new color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Dark green.
    pub const GREEN: Self = Self::rgb(0, 128, 0);
    /// Blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Yellow.
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    /// Purple.
    pub const PURPLE: Self = Self::rgb(128, 0, 128);
}

/// Colors of each scene element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Fill used by `clear`.
    pub background: Color,
    /// Axis lines.
    pub axes: Color,
    /// The moving point.
    pub point: Color,
    /// Position vector and its components.
    pub position: Color,
    /// Velocity vector and its components.
    pub velocity: Color,
    /// Acceleration vector and its components.
    pub acceleration: Color,
    /// Trajectory overlay.
    pub trajectory: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            axes: Color::WHITE,
            point: Color::BLUE,
            position: Color::PURPLE,
            velocity: Color::RED,
            acceleration: Color::YELLOW,
            trajectory: Color::GREEN,
        }
    }
}

/// Render boundary consumed by the session.
///
/// All coordinates are world coordinates with Y increasing upward; any flip
/// or offset belongs to the implementation.
pub trait SceneComposer {
    /// Start a new frame.
    fn clear(&mut self);

    /// Draw the coordinate axes through the world origin.
    fn draw_axes(&mut self);

    /// Draw the simulated point.
    fn draw_point(&mut self, position: Vec2, color: Color);

    /// Draw an arrow from `origin` to `tip`.
    fn draw_vector(&mut self, origin: Vec2, tip: Vec2, color: Color, dashed: bool);

    /// Draw the trajectory overlay.
    fn draw_trajectory_overlay(&mut self, path: &TrajectoryPath, color: Color);

    /// Flush the frame to the host.
    fn present(&mut self);
}

/// Maps world coordinates (Y up) onto a host screen (Y down).
///
/// One world unit is one display unit; only the origin moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Stage width in display units.
    pub width: f64,
    /// Stage height in display units.
    pub height: f64,
    /// Fraction of each extent kept clear around a bottom-left origin.
    pub padding: f64,
    /// Where the world origin sits on the stage.
    pub origin: OriginPlacement,
}

/// Visible world rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_config(&ViewportConfig::default())
    }
}

impl Viewport {
    /// Create a viewport.
    #[must_use]
    pub const fn new(width: f64, height: f64, padding: f64, origin: OriginPlacement) -> Self {
        Self {
            width,
            height,
            padding,
            origin,
        }
    }

    /// Viewport described by a session configuration.
    #[must_use]
    pub const fn from_config(config: &ViewportConfig) -> Self {
        Self::new(config.width, config.height, config.padding, config.origin)
    }

    /// Screen position of the world origin.
    #[must_use]
    pub fn origin_on_screen(&self) -> (f64, f64) {
        match self.origin {
            OriginPlacement::BottomLeft => (
                self.width * self.padding,
                self.height * (1.0 - self.padding),
            ),
            OriginPlacement::Center => (self.width / 2.0, self.height / 2.0),
        }
    }

    /// Convert world coordinates to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, p: Vec2) -> (f64, f64) {
        let (ox, oy) = self.origin_on_screen();
        (ox + p.x, oy - p.y)
    }

    /// Convert screen coordinates to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, sx: f64, sy: f64) -> Vec2 {
        let (ox, oy) = self.origin_on_screen();
        Vec2::new(sx - ox, oy - sy)
    }

    /// World rectangle covered by the stage.
    #[must_use]
    pub fn world_bounds(&self) -> WorldBounds {
        let (ox, oy) = self.origin_on_screen();
        WorldBounds {
            min_x: -ox,
            max_x: self.width - ox,
            min_y: oy - self.height,
            max_y: oy,
        }
    }
}

/// Screen-space render command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum RenderCommand {
    /// Clear the screen.
    Clear { color: Color },

    /// Draw the two axes crossing at the origin.
    DrawAxes {
        origin_x: f64,
        origin_y: f64,
        width: f64,
        height: f64,
        color: Color,
    },

    /// Draw a circle.
    DrawCircle {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
        filled: bool,
    },

    /// Draw an arrow.
    DrawArrow {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        dashed: bool,
    },

    /// Draw an open polyline.
    DrawPath {
        points: Vec<(f64, f64)>,
        color: Color,
        dashed: bool,
    },

    /// End of frame.
    Present,
}

/// Composer that records the last frame as screen-space commands.
#[derive(Debug, Clone)]
pub struct CommandRecorder {
    viewport: Viewport,
    background: Color,
    pending: Vec<RenderCommand>,
    frame: Vec<RenderCommand>,
    frames_presented: u64,
}

impl CommandRecorder {
    /// Create a recorder for `viewport`.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            background: Palette::default().background,
            pending: Vec::new(),
            frame: Vec::new(),
            frames_presented: 0,
        }
    }

    /// Viewport in use.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Replace the viewport; applies from the next frame.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Commands of the last presented frame.
    #[must_use]
    pub fn frame(&self) -> &[RenderCommand] {
        &self.frame
    }

    /// Commands recorded since the last `clear`, not yet presented.
    #[must_use]
    pub fn pending(&self) -> &[RenderCommand] {
        &self.pending
    }

    /// Number of presented frames.
    #[must_use]
    pub const fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    fn push(&mut self, command: RenderCommand) {
        self.pending.push(command);
    }
}

impl Default for CommandRecorder {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl SceneComposer for CommandRecorder {
    fn clear(&mut self) {
        self.pending.clear();
        self.push(RenderCommand::Clear {
            color: self.background,
        });
    }

    fn draw_axes(&mut self) {
        let (origin_x, origin_y) = self.viewport.origin_on_screen();
        self.push(RenderCommand::DrawAxes {
            origin_x,
            origin_y,
            width: self.viewport.width,
            height: self.viewport.height,
            color: Palette::default().axes,
        });
    }

    fn draw_point(&mut self, position: Vec2, color: Color) {
        let (x, y) = self.viewport.world_to_screen(position);
        self.push(RenderCommand::DrawCircle {
            x,
            y,
            radius: POINT_RADIUS,
            color,
            filled: true,
        });
    }

    fn draw_vector(&mut self, origin: Vec2, tip: Vec2, color: Color, dashed: bool) {
        let (x1, y1) = self.viewport.world_to_screen(origin);
        let (x2, y2) = self.viewport.world_to_screen(tip);
        self.push(RenderCommand::DrawArrow {
            x1,
            y1,
            x2,
            y2,
            color,
            dashed,
        });
    }

    fn draw_trajectory_overlay(&mut self, path: &TrajectoryPath, color: Color) {
        let command = match path {
            TrajectoryPath::Polyline { points } => RenderCommand::DrawPath {
                points: points
                    .iter()
                    .map(|p| self.viewport.world_to_screen(*p))
                    .collect(),
                color,
                dashed: true,
            },
            TrajectoryPath::Circle { center, radius } => {
                let (x, y) = self.viewport.world_to_screen(*center);
                RenderCommand::DrawCircle {
                    x,
                    y,
                    radius: *radius,
                    color,
                    filled: false,
                }
            }
        };
        self.push(command);
    }

    fn present(&mut self) {
        self.push(RenderCommand::Present);
        self.frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }
}

/// Composer that draws nothing; for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullComposer;

impl SceneComposer for NullComposer {
    fn clear(&mut self) {}
    fn draw_axes(&mut self) {}
    fn draw_point(&mut self, _position: Vec2, _color: Color) {}
    fn draw_vector(&mut self, _origin: Vec2, _tip: Vec2, _color: Color, _dashed: bool) {}
    fn draw_trajectory_overlay(&mut self, _path: &TrajectoryPath, _color: Color) {}
    fn present(&mut self) {}
}

/// Emit one frame in the fixed order:
/// clear, axes, point, position, velocity, acceleration, trajectory, present.
pub fn compose_frame<C: SceneComposer + ?Sized>(
    composer: &mut C,
    state: &KinematicState,
    display: &DisplayToggles,
    trajectory: Option<&TrajectoryPath>,
    palette: &Palette,
) {
    composer.clear();
    composer.draw_axes();
    composer.draw_point(state.position, palette.point);

    let p = state.position;

    if display.position {
        composer.draw_vector(Vec2::zero(), p, palette.position, false);
        if display.position_x {
            composer.draw_vector(Vec2::zero(), p.x_component(), palette.position, true);
        }
        if display.position_y {
            composer.draw_vector(Vec2::zero(), p.y_component(), palette.position, true);
        }
    }

    if display.velocity {
        draw_attached(
            composer,
            p,
            state.velocity,
            (display.velocity_x, display.velocity_y),
            palette.velocity,
        );
    }

    if display.acceleration {
        draw_attached(
            composer,
            p,
            state.acceleration,
            (display.acceleration_x, display.acceleration_y),
            palette.acceleration,
        );
    }

    if display.trajectory {
        if let Some(path) = trajectory {
            composer.draw_trajectory_overlay(path, palette.trajectory);
        }
    }

    composer.present();
}

/// Vector anchored at the point, with dashed non-zero components.
fn draw_attached<C: SceneComposer + ?Sized>(
    composer: &mut C,
    at: Vec2,
    v: Vec2,
    (show_x, show_y): (bool, bool),
    color: Color,
) {
    composer.draw_vector(at, at + v, color, false);
    if show_x && v.x != 0.0 {
        composer.draw_vector(at, at + v.x_component(), color, true);
    }
    if show_y && v.y != 0.0 {
        composer.draw_vector(at, at + v.y_component(), color, true);
    }
}
