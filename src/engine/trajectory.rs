//! Trajectory overlay sampling.
//!
//! Computes the full analytic path from the *initial* conditions, never
//! from live state, so the overlay stays fixed while the point moves along
//! it.
//!
//! # Flight time
//!
//! ```text
//! 0 = y₀ + v₀y·t + ½·a_y·t²   ⇒   t = (-v₀y ± √(v₀y² - 2·a_y·y₀)) / a_y
//! ```
//!
//! With downward acceleration the larger root is the landing time. Paths
//! that never reach the ground in forward time collapse to a single point.

use serde::{Deserialize, Serialize};

use crate::engine::integrator::{constant_acceleration_position, MotionLaw};
use crate::engine::scheduler::TerminationPolicy;
use crate::engine::state::{KinematicState, Vec2};
use crate::error::{KinError, KinResult};

/// Default number of sampling intervals (21 points).
pub const DEFAULT_INTERVALS: usize = 20;

/// Default horizon for paths without a landing time.
pub const DEFAULT_HORIZON_SECS: f64 = 10.0;

/// Roots closer to zero than this are treated as the launch instant.
const ROOT_EPSILON: f64 = 1e-12;

/// Overlay path descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrajectoryPath {
    /// Sampled points in order of increasing time.
    Polyline {
        /// Sample positions.
        points: Vec<Vec2>,
    },
    /// Closed circle.
    Circle {
        /// Circle centre.
        center: Vec2,
        /// Circle radius.
        radius: f64,
    },
}

impl TrajectoryPath {
    /// Whether the path carries no drawable extent.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        match self {
            Self::Polyline { points } => points.len() < 2,
            Self::Circle { radius, .. } => *radius <= 0.0,
        }
    }

    /// Sampled points, empty for closed curves.
    #[must_use]
    pub fn points(&self) -> &[Vec2] {
        match self {
            Self::Polyline { points } => points,
            Self::Circle { .. } => &[],
        }
    }
}

/// Samples overlay paths for every motion law.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySampler {
    /// Number of equal time intervals; produces `intervals + 1` points.
    pub intervals: usize,
    /// Time span sampled when the path has no landing time.
    pub horizon_secs: f64,
}

impl Default for TrajectorySampler {
    fn default() -> Self {
        Self {
            intervals: DEFAULT_INTERVALS,
            horizon_secs: DEFAULT_HORIZON_SECS,
        }
    }
}

impl TrajectorySampler {
    /// Create a sampler.
    #[must_use]
    pub const fn new(intervals: usize, horizon_secs: f64) -> Self {
        Self {
            intervals,
            horizon_secs,
        }
    }

    /// Sample the path starting from `initial` under `law`.
    ///
    /// Never fails: degenerate landing problems yield a single-point path.
    #[must_use]
    pub fn sample(
        &self,
        law: &MotionLaw,
        initial: &KinematicState,
        termination: TerminationPolicy,
    ) -> TrajectoryPath {
        match *law {
            MotionLaw::ClosedFormCircular { radius, .. } => TrajectoryPath::Circle {
                center: Vec2::zero(),
                radius,
            },
            MotionLaw::UniformVelocity => {
                self.sample_span(initial.position, initial.velocity, Vec2::zero(), self.horizon_secs)
            }
            MotionLaw::ConstantAcceleration => {
                let span = match termination {
                    TerminationPolicy::GroundContact => flight_time(
                        initial.position.y,
                        initial.velocity.y,
                        initial.acceleration.y,
                    ),
                    TerminationPolicy::Never => Ok(self.horizon_secs),
                };
                match span {
                    Ok(t) => self.sample_span(
                        initial.position,
                        initial.velocity,
                        initial.acceleration,
                        t,
                    ),
                    Err(err) => {
                        tracing::debug!(%err, "trajectory overlay collapsed to launch point");
                        TrajectoryPath::Polyline {
                            points: vec![initial.position],
                        }
                    }
                }
            }
        }
    }

    /// Sample `intervals + 1` equally spaced positions over `[0, span]`.
    #[must_use]
    pub fn sample_span(&self, p0: Vec2, v0: Vec2, a: Vec2, span: f64) -> TrajectoryPath {
        if self.intervals == 0 || !span.is_finite() || span <= 0.0 {
            return TrajectoryPath::Polyline { points: vec![p0] };
        }

        let dt = span / self.intervals as f64;
        let points = (0..=self.intervals)
            .map(|i| constant_acceleration_position(p0, v0, a, i as f64 * dt))
            .collect();

        TrajectoryPath::Polyline { points }
    }
}

/// Time until the point returns to `y = 0`.
///
/// # Errors
///
/// Returns `KinError::DegenerateTrajectory` when no strictly positive, real
/// landing time exists (e.g. zero acceleration while rising, or a negative
/// discriminant).
pub fn flight_time(y0: f64, vy: f64, ay: f64) -> KinResult<f64> {
    if !(y0.is_finite() && vy.is_finite() && ay.is_finite()) {
        return Err(KinError::degenerate("non-finite initial conditions"));
    }

    let t = if ay.abs() < f64::EPSILON {
        if vy >= 0.0 {
            return Err(KinError::degenerate("no vertical acceleration and not descending"));
        }
        -y0 / vy
    } else {
        let discriminant = vy * vy - 2.0 * ay * y0;
        if discriminant < 0.0 {
            return Err(KinError::degenerate(format!(
                "negative discriminant {discriminant:.6}"
            )));
        }
        let sqrt = discriminant.sqrt();
        let r1 = (-vy + sqrt) / ay;
        let r2 = (-vy - sqrt) / ay;

        if ay < 0.0 {
            r1.max(r2)
        } else {
            // upward acceleration: first touchdown, if any
            [r1.min(r2), r1.max(r2)]
                .into_iter()
                .find(|r| *r > ROOT_EPSILON)
                .unwrap_or(0.0)
        }
    };

    if t > ROOT_EPSILON && t.is_finite() {
        Ok(t)
    } else {
        Err(KinError::degenerate(format!(
            "no landing in forward time (root {t:.6})"
        )))
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The sampler never emits NaN points, whatever the initial values.
        #[test]
        fn prop_overlay_points_finite(
            px in 0.0f64..1200.0, py in 0.0f64..800.0,
            vx in 0.0f64..300.0, vy in 0.0f64..300.0,
            ax in -50.0f64..50.0, ay in -50.0f64..50.0,
        ) {
            let initial = KinematicState::new(Vec2::new(px, py), Vec2::new(vx, vy), Vec2::new(ax, ay));
            let path = TrajectorySampler::default().sample(
                &MotionLaw::ConstantAcceleration,
                &initial,
                TerminationPolicy::GroundContact,
            );
            prop_assert!(!path.points().is_empty());
            prop_assert!(path.points().iter().all(Vec2::is_finite));
        }

        /// With downward acceleration the last sample sits on the ground.
        #[test]
        fn prop_overlay_lands(
            py in 0.0f64..800.0,
            vy in 1.0f64..300.0,
            ay in -50.0f64..-5.0,
        ) {
            let initial = KinematicState::new(Vec2::new(0.0, py), Vec2::new(10.0, vy), Vec2::new(0.0, ay));
            let path = TrajectorySampler::default().sample(
                &MotionLaw::ConstantAcceleration,
                &initial,
                TerminationPolicy::GroundContact,
            );
            let last = path.points().last().copied().unwrap_or_default();
            prop_assert_eq!(path.points().len(), DEFAULT_INTERVALS + 1);
            prop_assert!(last.y.abs() < 1e-6 * (1.0 + py + vy * vy));
        }
    }
}
