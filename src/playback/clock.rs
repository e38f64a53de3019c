use crate::foundation::core::{ClockSnapshot, clamp_secs};

/// The scene clock: `current_time` in `[0, duration]` plus a playing flag.
///
/// `Stopped` is simply `is_playing == false` at time zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clock {
    current_time: f64,
    is_playing: bool,
    duration: f64,
}

impl Clock {
    /// Stopped clock for a scene of `duration` seconds.
    pub fn new(duration: f64) -> Self {
        Self {
            current_time: 0.0,
            is_playing: false,
            duration: clamp_secs(duration, f64::MAX),
        }
    }

    /// Read-only view for one tick.
    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            current_time: self.current_time,
            is_playing: self.is_playing,
            duration: self.duration,
        }
    }

    /// Seconds since scene start.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Whether the clock advances on tick.
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Scene duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Start advancing.
    pub fn play(&mut self) {
        self.is_playing = true;
    }

    /// Stop advancing, keeping the time.
    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    /// Rewind to zero and play.
    pub fn restart(&mut self) {
        self.current_time = 0.0;
        self.is_playing = true;
    }

    /// Move to `t`, clamped into the scene. Play state is unchanged.
    pub fn seek(&mut self, t: f64) {
        self.current_time = clamp_secs(t, self.duration);
    }

    /// Advance by `dt` seconds if playing.
    ///
    /// Reaching the end clamps to `duration` and stops the clock; returns `true` on that tick.
    pub fn step(&mut self, dt: f64) -> bool {
        if !self.is_playing {
            return false;
        }
        let next = self.current_time + dt.max(0.0);
        if next >= self.duration {
            self.current_time = self.duration;
            self.is_playing = false;
            return true;
        }
        self.current_time = next;
        false
    }
}
