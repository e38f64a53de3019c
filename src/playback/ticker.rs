use std::time::Duration;

/// Fixed-step accumulator.
///
/// Hosts feed it whatever time really elapsed; it hands back how many whole steps are due and
/// carries the remainder, so the clock always moves in exact step multiples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticker {
    step: Duration,
    acc: Duration,
}

impl Ticker {
    /// Ticker with the given step. A zero step is bumped to one millisecond.
    pub fn new(step: Duration) -> Self {
        Self {
            step: step.max(Duration::from_millis(1)),
            acc: Duration::ZERO,
        }
    }

    /// The fixed step.
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add `dt` and return the number of whole steps now due.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.acc += dt;
        let mut due = 0;
        while self.acc >= self.step {
            self.acc -= self.step;
            due += 1;
        }
        due
    }

    /// Drop any carried remainder.
    pub fn reset(&mut self) {
        self.acc = Duration::ZERO;
    }
}
