//! Motion laws advancing a [`KinematicState`] by a time delta.
//!
//! # Laws
//!
//! ```text
//! Constant acceleration:  p' = p + v·dt + ½·a·dt²      v' = v + a·dt
//! Uniform velocity:       p' = p + v·dt                v' = v
//! Circular (closed form): p(t) =  r·(cos ωt, sin ωt)
//!                         v(t) = ωr·(-sin ωt, cos ωt)
//!                         a(t) = -ω²r·(cos ωt, sin ωt)     ω = 2π / T
//! ```
//!
//! The constant-acceleration update is the exact solution of the equations
//! of motion, so stepping never accumulates truncation error. The circular
//! law ignores the previous position entirely and evaluates the formula at
//! the accumulated `sim_time`.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::engine::state::{KinematicState, Vec2};
use crate::error::{KinError, KinResult};

/// Motion law selected per demo variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "law", rename_all = "snake_case")]
pub enum MotionLaw {
    /// Constant acceleration taken from the state (projectile, accelerated).
    ConstantAcceleration,
    /// Zero acceleration, straight-line motion.
    UniformVelocity,
    /// Closed-form uniform circular motion centred on the origin.
    ClosedFormCircular {
        /// Circle radius in world units.
        radius: f64,
        /// Time for one revolution in seconds.
        period: f64,
    },
}

impl MotionLaw {
    /// Short name for display and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ConstantAcceleration => "constant_acceleration",
            Self::UniformVelocity => "uniform_velocity",
            Self::ClosedFormCircular { .. } => "circular",
        }
    }

    /// Whether the law is evaluated from elapsed time rather than stepped.
    #[must_use]
    pub const fn is_closed_form(&self) -> bool {
        matches!(self, Self::ClosedFormCircular { .. })
    }

    /// Advance `state` by `dt` simulated seconds.
    ///
    /// Negative, zero or non-finite deltas leave the state untouched.
    #[must_use]
    pub fn advance(&self, state: &KinematicState, dt: f64) -> KinematicState {
        if !(dt.is_finite() && dt > 0.0) {
            return *state;
        }

        match *self {
            Self::ConstantAcceleration => constant_acceleration_step(state, dt),
            Self::UniformVelocity => KinematicState {
                position: state.position + state.velocity * dt,
                velocity: state.velocity,
                acceleration: Vec2::zero(),
                sim_time: state.sim_time + dt,
            },
            Self::ClosedFormCircular { radius, period } => {
                circular_state(radius, period, state.sim_time + dt)
            }
        }
    }

    /// Strict variant of [`advance`](Self::advance).
    ///
    /// # Errors
    ///
    /// Returns `KinError::InvalidDelta` for negative or non-finite deltas.
    pub fn try_advance(&self, state: &KinematicState, dt: f64) -> KinResult<KinematicState> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(KinError::InvalidDelta { delta: dt });
        }
        Ok(self.advance(state, dt))
    }
}

fn constant_acceleration_step(state: &KinematicState, dt: f64) -> KinematicState {
    let KinematicState {
        position: p,
        velocity: v,
        acceleration: a,
        sim_time,
    } = *state;

    KinematicState {
        position: p + v * dt + a * (0.5 * dt * dt),
        velocity: v + a * dt,
        acceleration: a,
        sim_time: sim_time + dt,
    }
}

/// Angular velocity `2π / period`; zero for a non-positive period.
#[must_use]
pub fn angular_velocity(period: f64) -> f64 {
    if period > 0.0 {
        TAU / period
    } else {
        0.0
    }
}

/// Closed-form circular state at time `t`.
#[must_use]
pub fn circular_state(radius: f64, period: f64, t: f64) -> KinematicState {
    let omega = angular_velocity(period);
    let (sin, cos) = (omega * t).sin_cos();

    KinematicState {
        position: Vec2::new(radius * cos, radius * sin),
        velocity: Vec2::new(-omega * radius * sin, omega * radius * cos),
        acceleration: Vec2::new(-omega * omega * radius * cos, -omega * omega * radius * sin),
        sim_time: t,
    }
}

/// Position after `t` seconds of constant acceleration from `p0`, `v0`.
#[must_use]
pub fn constant_acceleration_position(p0: Vec2, v0: Vec2, a: Vec2, t: f64) -> Vec2 {
    p0 + v0 * t + a * (0.5 * t * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projectile() -> KinematicState {
        KinematicState::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(0.0, -20.0),
        )
    }

    #[test]
    fn test_constant_acceleration_single_step() {
        let next = MotionLaw::ConstantAcceleration.advance(&projectile(), 1.0);

        assert!((next.position.x - 100.0).abs() < 1e-12);
        assert!((next.position.y - 90.0).abs() < 1e-12);
        assert!((next.velocity.y - 80.0).abs() < 1e-12);
        assert!((next.sim_time - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_steps_compose_exactly() {
        let law = MotionLaw::ConstantAcceleration;
        let mut state = projectile();
        for _ in 0..100 {
            state = law.advance(&state, 0.05);
        }
        let direct = constant_acceleration_position(
            Vec2::zero(),
            Vec2::new(100.0, 100.0),
            Vec2::new(0.0, -20.0),
            5.0,
        );

        assert!((state.position.x - direct.x).abs() < 1e-9);
        assert!((state.position.y - direct.y).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_velocity_ignores_acceleration() {
        let mut state = projectile();
        state.acceleration = Vec2::new(5.0, 5.0);
        let next = MotionLaw::UniformVelocity.advance(&state, 2.0);

        assert_eq!(next.position, Vec2::new(200.0, 200.0));
        assert_eq!(next.velocity, state.velocity);
        assert_eq!(next.acceleration, Vec2::zero());
    }

    #[test]
    fn test_invalid_delta_is_a_no_op() {
        let law = MotionLaw::ConstantAcceleration;
        let state = projectile();

        assert_eq!(law.advance(&state, -1.0), state);
        assert_eq!(law.advance(&state, f64::NAN), state);
        assert_eq!(law.advance(&state, f64::INFINITY), state);
        assert_eq!(law.advance(&state, 0.0), state);
    }

    #[test]
    fn test_try_advance_rejects_bad_delta() {
        let law = MotionLaw::UniformVelocity;
        let state = projectile();

        assert!(matches!(
            law.try_advance(&state, -0.1),
            Err(KinError::InvalidDelta { .. })
        ));
        assert!(law.try_advance(&state, f64::NAN).is_err());
        assert_eq!(law.try_advance(&state, 0.0).ok(), Some(state));
    }

    #[test]
    fn test_circular_initial_state() {
        let state = circular_state(150.0, 10.0, 0.0);
        let omega = TAU / 10.0;

        assert!((state.position.x - 150.0).abs() < 1e-12);
        assert!(state.position.y.abs() < 1e-12);
        assert!((state.velocity.y - omega * 150.0).abs() < 1e-12);
        assert!((state.acceleration.x + omega * omega * 150.0).abs() < 1e-12);
    }

    #[test]
    fn test_circular_quarter_period() {
        let law = MotionLaw::ClosedFormCircular {
            radius: 150.0,
            period: 10.0,
        };
        let state = law.advance(&circular_state(150.0, 10.0, 0.0), 2.5);

        assert!(state.position.x.abs() < 1e-9);
        assert!((state.position.y - 150.0).abs() < 1e-9);
        assert!((state.sim_time - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_angular_velocity_guards_period() {
        assert!((angular_velocity(1.0) - TAU).abs() < 1e-12);
        assert!(angular_velocity(0.0).abs() < f64::EPSILON);
        assert!(angular_velocity(-3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_law_names() {
        assert_eq!(MotionLaw::ConstantAcceleration.name(), "constant_acceleration");
        assert!(MotionLaw::ClosedFormCircular {
            radius: 1.0,
            period: 1.0
        }
        .is_closed_form());
        assert!(!MotionLaw::UniformVelocity.is_closed_form());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// One step from t0 equals the closed form evaluated at t0 + dt.
        #[test]
        fn prop_step_matches_closed_form(
            px in -500.0f64..500.0, py in -500.0f64..500.0,
            vx in -300.0f64..300.0, vy in -300.0f64..300.0,
            ax in -50.0f64..50.0, ay in -50.0f64..50.0,
            t0 in 0.0f64..20.0, dt in 0.0f64..5.0,
        ) {
            let p0 = Vec2::new(px, py);
            let v0 = Vec2::new(vx, vy);
            let a = Vec2::new(ax, ay);

            let at_t0 = KinematicState {
                position: constant_acceleration_position(p0, v0, a, t0),
                velocity: v0 + a * t0,
                acceleration: a,
                sim_time: t0,
            };
            let stepped = MotionLaw::ConstantAcceleration.advance(&at_t0, dt);
            let direct = constant_acceleration_position(p0, v0, a, t0 + dt);
            let direct_v = v0 + a * (t0 + dt);

            let tol = 1e-9 * (1.0 + direct.magnitude());
            prop_assert!((stepped.position - direct).magnitude() < tol);
            prop_assert!((stepped.velocity - direct_v).magnitude() < 1e-9 * (1.0 + direct_v.magnitude()));
        }

        /// Circular motion stays on the circle with constant speed and centripetal acceleration.
        #[test]
        fn prop_circular_invariants(
            radius in 0.0f64..300.0,
            period in 1.0f64..20.0,
            t in 0.0f64..1000.0,
        ) {
            let state = circular_state(radius, period, t);
            let omega = angular_velocity(period);
            let tol = 1e-9 * (1.0 + radius * radius);

            prop_assert!((state.position.magnitude_squared() - radius * radius).abs() < tol);
            prop_assert!((state.speed() - omega * radius).abs() < 1e-9 * (1.0 + radius));
            prop_assert!((state.acceleration.magnitude() - omega * omega * radius).abs() < 1e-9 * (1.0 + radius));

            // anti-parallel: a = -ω² p
            let expected = state.position * (-omega * omega);
            prop_assert!((state.acceleration - expected).magnitude() < 1e-9 * (1.0 + radius));
        }
    }
}
