use crate::scene::model::AudioTimecode;

/// Per-track cue de-duplication.
///
/// Each cue is armed while the clock is before it. An armed cue fires once when the clock,
/// while playing, lands in `[time, time + window)`, and stays disarmed until the clock moves
/// back before `time`.
#[derive(Clone, Debug)]
pub(crate) struct CueTracker {
    armed: Vec<bool>,
    window: f64,
}

impl CueTracker {
    pub(crate) fn new(cues: usize, window: f64) -> Self {
        Self {
            armed: vec![true; cues],
            window: window.max(0.0),
        }
    }

    /// Indices of the cues crossed at `t`.
    pub(crate) fn observe(&mut self, cues: &[AudioTimecode], t: f64, playing: bool) -> Vec<usize> {
        let mut hits = Vec::new();
        for (i, (cue, armed)) in cues.iter().zip(self.armed.iter_mut()).enumerate() {
            if t < cue.time {
                *armed = true;
            } else if playing && *armed && t < cue.time + self.window {
                *armed = false;
                hits.push(i);
            }
        }
        hits
    }
}

/// Transient highlights waiting to be cleared.
#[derive(Clone, Debug, Default)]
pub(crate) struct Highlights {
    pending: Vec<(String, f64)>,
}

impl Highlights {
    /// Start (or restart) the hold timer for `layer_id`.
    pub(crate) fn hold(&mut self, layer_id: &str, secs: f64) {
        if let Some(slot) = self.pending.iter_mut().find(|(id, _)| id == layer_id) {
            slot.1 = secs;
        } else {
            self.pending.push((layer_id.to_owned(), secs));
        }
    }

    /// Advance every timer by `dt` seconds and return the layers whose hold ran out.
    pub(crate) fn advance(&mut self, dt: f64) -> Vec<String> {
        let mut expired = Vec::new();
        self.pending.retain_mut(|(id, left)| {
            *left -= dt;
            if *left <= 1e-9 {
                expired.push(std::mem::take(id));
                false
            } else {
                true
            }
        });
        expired
    }

    pub(crate) fn clear(&mut self) {
        self.pending.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/cue.rs"]
mod tests;
