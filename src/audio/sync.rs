//! Audio Synchronizer.
//!
//! Keeps one transport per authored track phase-locked to the scene clock, fires timecode cues
//! and runs gain ramps (crossfade in/out and explicit track-to-track crossfades).
//!
//! Ramps and highlight holds run on elapsed host time fed through [`AudioSynchronizer::pump`],
//! not on the scene clock, so they keep going while playback is paused.

use crate::audio::backend::{AudioBackend, LoadState, Transport};
use crate::audio::cue::{CueTracker, Highlights};
use crate::audio::ramp::{RampEnd, VolumeRamp};
use crate::config::PlaybackOpts;
use crate::foundation::core::ClockSnapshot;
use crate::foundation::error::{StoryError, StoryResult};
use crate::render::tree::LayerSurface;
use crate::scene::model::{AudioTrack, TimecodeAction};
use std::collections::HashMap;

struct Channel {
    track: AudioTrack,
    /// `None` once the track is inert.
    transport: Option<Box<dyn Transport>>,
    ramp: Option<VolumeRamp>,
    /// Faded out by a crossfade; sync must not restart it.
    parked: bool,
    cues: CueTracker,
}

/// Drives the audio transports of the current scene.
pub struct AudioSynchronizer {
    backend: Box<dyn AudioBackend>,
    channels: Vec<Channel>,
    index: HashMap<String, usize>,
    highlights: Highlights,
    cue_window: f64,
    highlight_secs: f64,
    last: Option<ClockSnapshot>,
}

impl std::fmt::Debug for AudioSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioSynchronizer")
            .field("tracks", &self.index.keys().collect::<Vec<_>>())
            .field("highlights", &self.highlights.len())
            .finish_non_exhaustive()
    }
}

impl AudioSynchronizer {
    /// Synchronizer loading its transports from `backend`.
    pub fn new(backend: Box<dyn AudioBackend>, opts: &PlaybackOpts) -> Self {
        Self {
            backend,
            channels: Vec::new(),
            index: HashMap::new(),
            highlights: Highlights::default(),
            cue_window: opts.cue_window_secs,
            highlight_secs: opts.highlight_secs(),
            last: None,
        }
    }

    /// Release every transport and load one per track.
    ///
    /// A track that fails to load is logged and stays inert for the lifetime of this build.
    #[tracing::instrument(skip(self, tracks), fields(tracks = tracks.len()))]
    pub fn rebuild(&mut self, tracks: &[AudioTrack]) {
        self.dispose();
        for track in tracks {
            if self.index.contains_key(&track.id) {
                continue;
            }
            let transport = match self.backend.load(track) {
                Ok(mut t) if t.load_state() == LoadState::Failed => {
                    tracing::error!(track = %track.id, url = %track.url, "audio failed to load; track is inert");
                    t.unload();
                    None
                }
                Ok(mut t) => {
                    // Still-loading transports get their gain from `drive` once ready.
                    if t.load_state() == LoadState::Ready {
                        t.set_volume(track.volume);
                    }
                    Some(t)
                }
                Err(e) => {
                    tracing::error!(track = %track.id, url = %track.url, error = %e, "audio failed to load; track is inert");
                    None
                }
            };
            self.index.insert(track.id.clone(), self.channels.len());
            self.channels.push(Channel {
                track: track.clone(),
                transport,
                ramp: None,
                parked: false,
                cues: CueTracker::new(track.timecodes.len(), self.cue_window),
            });
        }
        tracing::debug!(channels = self.channels.len(), "audio rebuilt");
    }

    /// Bring every transport in line with `snap` and fire the cues it crosses.
    ///
    /// `on_hit` receives the cue time and its track for every cue fired.
    pub fn sync(
        &mut self,
        snap: ClockSnapshot,
        surface: &mut dyn LayerSurface,
        on_hit: &mut dyn FnMut(f64, &AudioTrack),
    ) {
        self.last = Some(snap);
        for ch in &mut self.channels {
            drive(ch, snap);

            for i in ch.cues.observe(&ch.track.timecodes, snap.current_time, snap.is_playing) {
                let cue = &ch.track.timecodes[i];
                tracing::trace!(track = %ch.track.id, time = cue.time, "cue hit");
                on_hit(cue.time, &ch.track);

                if cue.action == Some(TimecodeAction::Highlight)
                    && let Some(layer_id) = cue.layer_id.as_deref()
                    && let Some(visual) = surface.layer_mut(layer_id)
                {
                    visual.highlighted = true;
                    self.highlights.hold(layer_id, self.highlight_secs);
                }
            }
        }
    }

    /// Fade `from` out and `to` in over `duration_ms`, concurrently.
    ///
    /// Returns immediately; the ramps advance through [`AudioSynchronizer::pump`] and `from` is
    /// stopped once its ramp completes. Unknown track ids are an error and change nothing.
    ///
    /// `to` only starts while the clock is playing. Otherwise, or while `to` is still loading,
    /// its ramp is kept pending and the next playing sync starts the track.
    pub fn crossfade(&mut self, from: &str, to: &str, duration_ms: u64) -> StoryResult<()> {
        let (Some(&fi), Some(&ti)) = (self.index.get(from), self.index.get(to)) else {
            tracing::warn!(from, to, "crossfade between unknown tracks");
            return Err(StoryError::audio(format!(
                "crossfade between unknown tracks '{from}' -> '{to}'"
            )));
        };
        let secs = duration_ms as f64 / 1000.0;
        let (t, playing) = self
            .last
            .map_or((0.0, false), |s| (s.current_time, s.is_playing));

        let src = &mut self.channels[fi];
        src.parked = true;
        src.ramp = ready(&mut src.transport)
            .map(|tr| VolumeRamp::new(tr.volume(), 0.0, secs, RampEnd::Stop));

        let dst = &mut self.channels[ti];
        dst.parked = false;
        if dst.transport.is_some() {
            dst.ramp = Some(VolumeRamp::new(0.0, dst.track.volume, secs, RampEnd::Hold));
        }
        if let Some(tr) = ready(&mut dst.transport) {
            tr.set_volume(0.0);
            if playing && !tr.is_playing() {
                tr.seek(t);
                tr.play();
            }
        }

        tracing::debug!(from, to, duration_ms, playing, "crossfade started");
        // Zero-length fades settle right away.
        self.advance_ramps(0.0);
        Ok(())
    }

    /// Advance ramps and highlight holds by `dt` seconds of host time.
    pub fn pump(&mut self, dt: f64, surface: &mut dyn LayerSurface) {
        self.advance_ramps(dt);
        for layer_id in self.highlights.advance(dt) {
            if let Some(visual) = surface.layer_mut(&layer_id) {
                visual.highlighted = false;
            }
        }
    }

    fn advance_ramps(&mut self, dt: f64) {
        for ch in &mut self.channels {
            let Some(ramp) = ch.ramp.as_mut() else {
                continue;
            };
            if ch.transport.is_none() {
                ch.ramp = None;
                continue;
            }
            // A ramp on a loading transport waits; it runs from the start once ready.
            let Some(tr) = ready(&mut ch.transport) else {
                continue;
            };
            let gain = ramp.advance(dt);
            tr.set_volume(gain);
            if ramp.done() {
                if ramp.end == RampEnd::Stop {
                    tr.stop();
                }
                ch.ramp = None;
            }
        }
    }

    /// Unload every transport and drop pending ramps, cues and highlights.
    pub fn dispose(&mut self) {
        for ch in &mut self.channels {
            if let Some(mut tr) = ch.transport.take() {
                tr.unload();
            }
        }
        self.channels.clear();
        self.index.clear();
        self.highlights.clear();
        self.last = None;
    }

    /// Number of tracks in the current build.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// `true` when no track is loaded.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Whether `track_id` failed to load. `None` for unknown tracks.
    pub fn is_inert(&self, track_id: &str) -> Option<bool> {
        self.channel(track_id).map(|c| c.transport.is_none())
    }

    /// Whether `track_id` is transporting audio.
    pub fn is_playing(&self, track_id: &str) -> Option<bool> {
        self.channel(track_id)
            .map(|c| c.transport.as_ref().is_some_and(|t| t.is_playing()))
    }

    /// Current gain of `track_id`.
    pub fn volume(&self, track_id: &str) -> Option<f32> {
        self.channel(track_id)?.transport.as_ref().map(|t| t.volume())
    }

    /// Number of highlight holds still running.
    pub fn pending_highlights(&self) -> usize {
        self.highlights.len()
    }

    fn channel(&self, track_id: &str) -> Option<&Channel> {
        self.index.get(track_id).map(|&i| &self.channels[i])
    }
}

impl Drop for AudioSynchronizer {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn drive(ch: &mut Channel, snap: ClockSnapshot) {
    let state = match ch.transport.as_ref() {
        Some(t) => t.load_state(),
        None => return,
    };
    match state {
        LoadState::Loading => return,
        LoadState::Failed => {
            tracing::error!(track = %ch.track.id, url = %ch.track.url, "audio failed to load; track is inert");
            if let Some(mut t) = ch.transport.take() {
                t.unload();
            }
            return;
        }
        LoadState::Ready => {}
    }
    let Some(transport) = ch.transport.as_mut() else {
        return;
    };

    let t = snap.current_time;
    if snap.is_playing {
        if transport.is_playing() {
            transport.seek(t);
        } else if !ch.parked {
            transport.seek(t);
            if let Some(ramp) = ch.ramp.as_ref() {
                // Pending crossfade ramp.
                transport.set_volume(ramp.value());
            } else if let Some(fade_in) = ch.track.crossfade_in
                && fade_in > 0.0
                && t < fade_in
            {
                transport.set_volume(0.0);
                ch.ramp = Some(VolumeRamp::new(0.0, ch.track.volume, fade_in, RampEnd::Hold));
            }
            transport.play();
        }
    } else if transport.is_playing() {
        transport.pause();
    }

    if ch.ramp.is_none() && !ch.parked {
        let gain = ch.track.volume * fade_out_factor(&ch.track, snap);
        if (transport.volume() - gain).abs() > f32::EPSILON {
            transport.set_volume(gain);
        }
    }
}

/// The transport, if it exists and is ready to take commands.
fn ready(transport: &mut Option<Box<dyn Transport>>) -> Option<&mut Box<dyn Transport>> {
    transport
        .as_mut()
        .filter(|t| t.load_state() == LoadState::Ready)
}

/// Gain multiplier for the track's fade-out window before scene end.
fn fade_out_factor(track: &AudioTrack, snap: ClockSnapshot) -> f32 {
    match track.crossfade_out {
        Some(window) if window > 0.0 => (snap.remaining() / window).clamp(0.0, 1.0) as f32,
        _ => 1.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/sync.rs"]
mod tests;
