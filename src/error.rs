//! Error types for kinesim.
//!
//! All fallible operations return `Result<T, KinError>` instead of panicking.
//! Frame-loop errors are local and recoverable: the worst outcome of any of
//! them is a frozen point or a missing overlay, never a dead session.

use thiserror::Error;

/// Result type alias for kinesim operations.
pub type KinResult<T> = Result<T, KinError>;

/// Unified error type for all kinesim operations.
#[derive(Debug, Error)]
pub enum KinError {
    // ===== Frame loop =====
    /// Non-finite value (NaN or Inf) reached the kinematic state.
    #[error("non-finite value detected at {location}")]
    NonFiniteValue {
        /// Location of the offending component (e.g. `velocity.y`).
        location: String,
    },

    /// A frame delta that is negative or non-finite.
    #[error("invalid frame delta {delta} s")]
    InvalidDelta {
        /// The rejected delta, in seconds.
        delta: f64,
    },

    /// The flight-time quadratic has no forward-time root.
    #[error("degenerate trajectory: {reason}")]
    DegenerateTrajectory {
        /// Why no flight time exists.
        reason: String,
    },

    // ===== Configuration =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// A panel value outside its declared range.
    #[error("field '{field}' value {value} outside [{min}, {max}]")]
    FieldOutOfRange {
        /// Field label.
        field: String,
        /// Offending value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// A panel field that does not exist for the active motion law.
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Schema validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl KinError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create a degenerate-trajectory error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateTrajectory {
            reason: reason.into(),
        }
    }

    /// Whether the session can keep stepping after this error.
    ///
    /// Everything raised from inside the frame loop is recoverable; only
    /// configuration loading and I/O are not.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NonFiniteValue { .. }
                | Self::InvalidDelta { .. }
                | Self::DegenerateTrajectory { .. }
                | Self::FieldOutOfRange { .. }
                | Self::UnknownField(_)
        )
    }
}

impl From<serde_json::Error> for KinError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
