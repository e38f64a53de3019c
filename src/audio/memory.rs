//! In-memory audio backend.
//!
//! Nothing is decoded or output. Each transport records the commands it receives so hosts
//! without an audio device (tests, the headless CLI) can observe what playback would do.

use crate::audio::backend::{AudioBackend, LoadState, Transport};
use crate::foundation::error::{StoryError, StoryResult};
use crate::scene::model::AudioTrack;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Observable state of one simulated voice.
#[derive(Clone, Debug, PartialEq)]
pub struct VoiceState {
    /// Track the voice was loaded for.
    pub track_id: String,
    /// Source URL.
    pub url: String,
    /// Load state.
    pub load_state: LoadState,
    /// Whether the voice is playing.
    pub playing: bool,
    /// Play head in seconds.
    pub position: f64,
    /// Current gain.
    pub volume: f32,
    /// Loop flag copied from the track.
    pub looping: bool,
    /// Set once the voice was unloaded.
    pub unloaded: bool,
    /// Number of `play` calls that started the voice.
    pub starts: u32,
    /// Number of `stop` calls.
    pub stops: u32,
    /// Every gain written, in order.
    pub volume_log: Vec<f32>,
}

type Voice = Rc<RefCell<VoiceState>>;

#[derive(Debug, Default)]
struct Inner {
    voices: Vec<Voice>,
    failing: HashSet<String>,
    rejected: HashSet<String>,
    deferred: HashSet<String>,
}

/// Simulated backend. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryBackend {
    /// Backend where every load succeeds immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads of `url` will report [`LoadState::Failed`].
    pub fn fail_url(&self, url: impl Into<String>) -> &Self {
        self.inner.borrow_mut().failing.insert(url.into());
        self
    }

    /// Loads of `url` return an error straight away.
    pub fn reject_url(&self, url: impl Into<String>) -> &Self {
        self.inner.borrow_mut().rejected.insert(url.into());
        self
    }

    /// Loads of `url` stay in [`LoadState::Loading`] until [`MemoryBackend::finish_loading`].
    pub fn defer_url(&self, url: impl Into<String>) -> &Self {
        self.inner.borrow_mut().deferred.insert(url.into());
        self
    }

    /// Complete every pending load of `url`.
    pub fn finish_loading(&self, url: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.deferred.remove(url);
        for v in &inner.voices {
            let mut v = v.borrow_mut();
            if v.url == url && v.load_state == LoadState::Loading {
                v.load_state = LoadState::Ready;
            }
        }
    }

    /// Snapshot of the most recent voice loaded for `track_id`.
    pub fn voice(&self, track_id: &str) -> Option<VoiceState> {
        self.inner
            .borrow()
            .voices
            .iter()
            .rev()
            .find(|v| v.borrow().track_id == track_id)
            .map(|v| v.borrow().clone())
    }

    /// Total number of voices ever loaded.
    pub fn loaded_count(&self) -> usize {
        self.inner.borrow().voices.len()
    }

    /// Number of voices not yet unloaded.
    pub fn live_count(&self) -> usize {
        self.inner
            .borrow()
            .voices
            .iter()
            .filter(|v| !v.borrow().unloaded)
            .count()
    }

    /// Advance the play head of every playing voice by `dt` seconds.
    pub fn advance(&self, dt: f64) {
        for v in &self.inner.borrow().voices {
            let mut v = v.borrow_mut();
            if v.playing {
                v.position += dt;
            }
        }
    }
}

impl AudioBackend for MemoryBackend {
    fn load(&mut self, track: &AudioTrack) -> StoryResult<Box<dyn Transport>> {
        let mut inner = self.inner.borrow_mut();
        if inner.rejected.contains(&track.url) {
            return Err(StoryError::audio(format!("cannot open '{}'", track.url)));
        }
        let load_state = if inner.failing.contains(&track.url) {
            LoadState::Failed
        } else if inner.deferred.contains(&track.url) {
            LoadState::Loading
        } else {
            LoadState::Ready
        };
        let voice = Rc::new(RefCell::new(VoiceState {
            track_id: track.id.clone(),
            url: track.url.clone(),
            load_state,
            playing: false,
            position: 0.0,
            volume: track.volume,
            looping: track.looping,
            unloaded: false,
            starts: 0,
            stops: 0,
            volume_log: Vec::new(),
        }));
        inner.voices.push(Rc::clone(&voice));
        Ok(Box::new(MemoryTransport { voice }))
    }
}

struct MemoryTransport {
    voice: Voice,
}

impl MemoryTransport {
    fn usable(&self) -> bool {
        let v = self.voice.borrow();
        v.load_state == LoadState::Ready && !v.unloaded
    }
}

impl Transport for MemoryTransport {
    fn load_state(&self) -> LoadState {
        self.voice.borrow().load_state
    }

    fn is_playing(&self) -> bool {
        self.voice.borrow().playing
    }

    fn play(&mut self) {
        if !self.usable() {
            return;
        }
        let mut v = self.voice.borrow_mut();
        if !v.playing {
            v.playing = true;
            v.starts += 1;
        }
    }

    fn pause(&mut self) {
        self.voice.borrow_mut().playing = false;
    }

    fn stop(&mut self) {
        let mut v = self.voice.borrow_mut();
        v.playing = false;
        v.position = 0.0;
        v.stops += 1;
    }

    fn seek(&mut self, secs: f64) {
        if !self.usable() {
            return;
        }
        self.voice.borrow_mut().position = secs.max(0.0);
    }

    fn position(&self) -> f64 {
        self.voice.borrow().position
    }

    fn set_volume(&mut self, volume: f32) {
        let mut v = self.voice.borrow_mut();
        let volume = volume.clamp(0.0, 1.0);
        v.volume = volume;
        v.volume_log.push(volume);
    }

    fn volume(&self) -> f32 {
        self.voice.borrow().volume
    }

    fn unload(&mut self) {
        let mut v = self.voice.borrow_mut();
        v.playing = false;
        v.unloaded = true;
    }
}
