/// What happens to a transport when its ramp completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RampEnd {
    Hold,
    Stop,
}

/// Linear gain ramp advanced by elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct VolumeRamp {
    from: f32,
    to: f32,
    duration: f64,
    elapsed: f64,
    pub(crate) end: RampEnd,
}

impl VolumeRamp {
    pub(crate) fn new(from: f32, to: f32, duration: f64, end: RampEnd) -> Self {
        Self {
            from,
            to,
            duration: if duration.is_finite() { duration.max(0.0) } else { 0.0 },
            elapsed: 0.0,
            end,
        }
    }

    /// Gain at the current elapsed time.
    pub(crate) fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let p = (self.elapsed / self.duration).clamp(0.0, 1.0) as f32;
        self.from + (self.to - self.from) * p
    }

    /// Advance by `dt` seconds and return the new gain.
    pub(crate) fn advance(&mut self, dt: f64) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
            // Summed host steps drift; snap to the end when within rounding error.
            if self.duration - self.elapsed < 1e-9 {
                self.elapsed = self.duration;
            }
        }
        self.value()
    }

    pub(crate) fn done(&self) -> bool {
        self.elapsed >= self.duration
    }
}
