//! Kinematic state of the simulated point.
//!
//! Holds the live position, velocity and acceleration together with the
//! simulated time accumulated since the last restart. All quantities are in
//! world units with Y pointing up.

use serde::{Deserialize, Serialize};

use crate::error::{KinError, KinResult};

/// 2D vector for positions, velocities and accelerations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
}

impl Vec2 {
    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Zero vector.
    #[must_use]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector at `angle` radians from the X axis.
    #[must_use]
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { x: cos, y: sin }
    }

    /// Magnitude squared.
    #[must_use]
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Magnitude (length).
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Dot product.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Scale by scalar.
    #[must_use]
    pub fn scale(&self, s: f64) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
        }
    }

    /// X component as a vector along the X axis.
    #[must_use]
    pub const fn x_component(&self) -> Self {
        Self { x: self.x, y: 0.0 }
    }

    /// Y component as a vector along the Y axis.
    #[must_use]
    pub const fn y_component(&self) -> Self {
        Self { x: 0.0, y: self.y }
    }

    /// Check if all components are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Kinematic state of a single point.
///
/// `position` and `velocity` at `sim_time` are always consistent with the
/// motion law that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KinematicState {
    /// Current location.
    pub position: Vec2,
    /// Rate of change of position, units/second.
    pub velocity: Vec2,
    /// Rate of change of velocity, units/second².
    pub acceleration: Vec2,
    /// Simulated seconds since the last restart.
    pub sim_time: f64,
}

impl KinematicState {
    /// Create a state at `sim_time = 0`.
    #[must_use]
    pub const fn new(position: Vec2, velocity: Vec2, acceleration: Vec2) -> Self {
        Self {
            position,
            velocity,
            acceleration,
            sim_time: 0.0,
        }
    }

    /// Speed (velocity magnitude).
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    /// Verify every component is finite.
    ///
    /// # Errors
    ///
    /// Returns `KinError::NonFiniteValue` naming the first bad component.
    pub fn check_finite(&self) -> KinResult<()> {
        let components = [
            ("position.x", self.position.x),
            ("position.y", self.position.y),
            ("velocity.x", self.velocity.x),
            ("velocity.y", self.velocity.y),
            ("acceleration.x", self.acceleration.x),
            ("acceleration.y", self.acceleration.y),
            ("sim_time", self.sim_time),
        ];

        match components.iter().find(|(_, v)| !v.is_finite()) {
            Some((location, _)) => Err(KinError::NonFiniteValue {
                location: (*location).to_string(),
            }),
            None => Ok(()),
        }
    }
}
