use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Engine tuning knobs.
///
/// Deserializes from camelCase JSON; every field is optional and falls back to [`Default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaybackOpts {
    /// Fixed clock step per tick, in milliseconds.
    pub tick_ms: u64,
    /// Width of the window after a cue's time in which it may fire, in seconds.
    pub cue_window_secs: f64,
    /// How long a cue highlight stays on its layer, in milliseconds.
    pub highlight_ms: u64,
    /// Crossfade length used when a caller does not pass one, in milliseconds.
    pub default_crossfade_ms: u64,
    /// Start playing as soon as a scene is loaded.
    pub autoplay: bool,
}

impl Default for PlaybackOpts {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            cue_window_secs: 0.1,
            highlight_ms: 500,
            default_crossfade_ms: 1000,
            autoplay: true,
        }
    }
}

impl PlaybackOpts {
    /// Clock step as a [`Duration`]. Never zero.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Highlight hold time in seconds.
    pub fn highlight_secs(&self) -> f64 {
        self.highlight_ms as f64 / 1000.0
    }
}
