pub use kurbo::{Affine, Vec2};

/// One read-only observation of the shared playback clock.
///
/// The controller takes a single snapshot per tick and hands the same value to every
/// subsystem, so nothing observes a clock that changed mid-tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ClockSnapshot {
    /// Scene time in seconds, always inside `[0, duration]`.
    pub current_time: f64,
    /// Whether the clock is advancing.
    pub is_playing: bool,
    /// Authored scene duration in seconds.
    pub duration: f64,
}

impl ClockSnapshot {
    /// Seconds left until the scene ends.
    pub fn remaining(self) -> f64 {
        (self.duration - self.current_time).max(0.0)
    }
}

/// Clamp `t` into `[0, max]`. Non-finite input clamps to `0`.
pub fn clamp_secs(t: f64, max: f64) -> f64 {
    if !t.is_finite() {
        return if t == f64::INFINITY { max.max(0.0) } else { 0.0 };
    }
    t.clamp(0.0, max.max(0.0))
}

/// Convert a duration to fractional seconds.
pub fn secs(d: std::time::Duration) -> f64 {
    d.as_secs_f64()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
