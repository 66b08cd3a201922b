//! Stop-on-error guard for the live state.
//!
//! Runs after every integrator update. A state with a NaN or infinite
//! component is never published: the guard hands back the last good state
//! and records the trip, which freezes the point instead of poisoning every
//! later frame.

use serde::{Deserialize, Serialize};

use crate::engine::state::KinematicState;
use crate::error::KinError;

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GuardVerdict {
    /// The candidate state is sound.
    Accepted,
    /// The candidate was discarded.
    Rejected {
        /// Component that failed.
        location: String,
    },
}

/// Non-finite state detector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateGuard {
    trips: u64,
}

impl StateGuard {
    /// Create a guard.
    #[must_use]
    pub const fn new() -> Self {
        Self { trips: 0 }
    }

    /// Number of rejected updates.
    #[must_use]
    pub const fn trips(&self) -> u64 {
        self.trips
    }

    /// Check `candidate`; on failure keep `previous`.
    ///
    /// Returns the state to publish and the verdict.
    pub fn check(
        &mut self,
        previous: &KinematicState,
        candidate: KinematicState,
    ) -> (KinematicState, GuardVerdict) {
        match candidate.check_finite() {
            Ok(()) => (candidate, GuardVerdict::Accepted),
            Err(KinError::NonFiniteValue { location }) => {
                self.trips += 1;
                tracing::warn!(%location, trips = self.trips, "non-finite state discarded");
                (*previous, GuardVerdict::Rejected { location })
            }
            Err(other) => {
                self.trips += 1;
                tracing::warn!(%other, "state check failed");
                (
                    *previous,
                    GuardVerdict::Rejected {
                        location: other.to_string(),
                    },
                )
            }
        }
    }

    /// Forget past trips.
    pub fn reset(&mut self) {
        self.trips = 0;
    }
}
