//! Frame clock: converts host timestamps into simulated time deltas.
//!
//! Handles:
//! - First-frame anchoring (no previous timestamp, zero delta)
//! - Time scaling (simulated seconds per real second)
//! - Rejection of negative or non-finite deltas
//! - Optional clamping of long real-time gaps (suspended hosts)

use serde::{Deserialize, Serialize};

/// Delta produced for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameDelta {
    /// Real seconds elapsed since the previous frame, after clamping.
    pub real_secs: f64,
    /// Simulated seconds to integrate this frame.
    pub scaled_secs: f64,
    /// No previous timestamp existed; nothing to integrate.
    pub first_frame: bool,
    /// The real delta exceeded the configured maximum and was clamped.
    pub clamped: bool,
    /// The raw delta was negative or non-finite and was replaced by zero.
    pub rejected: bool,
}

impl FrameDelta {
    /// Whether this delta should drive an integrator update.
    #[must_use]
    pub fn is_advancing(&self) -> bool {
        self.scaled_secs > 0.0
    }
}

/// Scaled delta in seconds between two millisecond timestamps.
///
/// Returns zero when there is no previous timestamp, when the raw delta is
/// negative or non-finite, or when `time_scale` is not strictly positive.
#[must_use]
pub fn scaled_delta(previous_ms: Option<f64>, current_ms: f64, time_scale: f64) -> f64 {
    let Some(previous_ms) = previous_ms else {
        return 0.0;
    };
    let raw = (current_ms - previous_ms) / 1000.0;
    if !raw.is_finite() || raw < 0.0 || !time_scale.is_finite() || time_scale <= 0.0 {
        return 0.0;
    }
    raw * time_scale
}

/// Wall-clock to simulated-time converter.
///
/// Created once per session; re-anchored on restart so the first frame after
/// a restart never integrates the gap that preceded it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameClock {
    /// Timestamp of the previous frame in milliseconds.
    last_timestamp_ms: Option<f64>,
    /// Simulated seconds per real second.
    time_scale: f64,
    /// Upper bound on the real delta of a single frame.
    max_real_delta_secs: Option<f64>,
    /// Frames observed since creation or reset.
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock with the given time scale and optional gap clamp.
    #[must_use]
    pub const fn new(time_scale: f64, max_real_delta_secs: Option<f64>) -> Self {
        Self {
            last_timestamp_ms: None,
            time_scale,
            max_real_delta_secs,
            frame_count: 0,
        }
    }

    /// Current time scale.
    #[must_use]
    pub const fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Set the time scale; takes effect on the next frame.
    pub fn set_time_scale(&mut self, time_scale: f64) {
        self.time_scale = time_scale;
    }

    /// Configured gap clamp.
    #[must_use]
    pub const fn max_real_delta_secs(&self) -> Option<f64> {
        self.max_real_delta_secs
    }

    /// Set or remove the gap clamp.
    pub fn set_max_real_delta_secs(&mut self, max: Option<f64>) {
        self.max_real_delta_secs = max;
    }

    /// Timestamp of the previous frame, if any.
    #[must_use]
    pub const fn last_timestamp_ms(&self) -> Option<f64> {
        self.last_timestamp_ms
    }

    /// Number of frames ticked.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Consume a frame timestamp and produce its delta.
    ///
    /// Non-finite timestamps are ignored entirely: they produce a rejected
    /// zero delta and do not replace the previous anchor.
    pub fn tick(&mut self, timestamp_ms: f64) -> FrameDelta {
        self.frame_count += 1;

        if !timestamp_ms.is_finite() {
            return FrameDelta {
                rejected: true,
                ..FrameDelta::default()
            };
        }

        let Some(previous) = self.last_timestamp_ms.replace(timestamp_ms) else {
            return FrameDelta {
                first_frame: true,
                ..FrameDelta::default()
            };
        };

        let raw = (timestamp_ms - previous) / 1000.0;
        if raw < 0.0 {
            return FrameDelta {
                rejected: true,
                ..FrameDelta::default()
            };
        }

        let (real_secs, clamped) = match self.max_real_delta_secs {
            Some(max) if raw > max => (max, true),
            _ => (raw, false),
        };

        FrameDelta {
            real_secs,
            scaled_secs: self.scale(real_secs),
            first_frame: false,
            clamped,
            rejected: false,
        }
    }

    fn scale(&self, real_secs: f64) -> f64 {
        if self.time_scale.is_finite() && self.time_scale > 0.0 {
            real_secs * self.time_scale
        } else {
            0.0
        }
    }

    /// Forget the previous timestamp; the next frame becomes a first frame.
    pub fn reanchor(&mut self) {
        self.last_timestamp_ms = None;
    }

    /// Re-anchor and clear the frame counter.
    pub fn reset(&mut self) {
        self.reanchor();
        self.frame_count = 0;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(1.0, Some(0.1))
    }
}
