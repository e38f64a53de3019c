//! Playback Controller.
//!
//! Owns the scene clock and drives the timeline scheduler and the audio synchronizer from it.
//! Every tick and every transport operation takes one clock snapshot and hands it to both, so
//! visuals and audio always observe the same `(current_time, is_playing)`.

use crate::audio::backend::AudioBackend;
use crate::audio::sync::AudioSynchronizer;
use crate::config::PlaybackOpts;
use crate::expression::condition::is_visible;
use crate::foundation::core::{ClockSnapshot, secs};
use crate::foundation::error::{StoryError, StoryResult};
use crate::playback::clock::Clock;
use crate::playback::ticker::Ticker;
use crate::playback::timeline::TimelineScheduler;
use crate::render::tree::RenderTree;
use crate::scene::model::{AudioTrack, Choice, Scene};
use crate::scene::variables::{Variables, assign};
use std::sync::Arc;
use std::time::Duration;

type ChoiceCallback = Box<dyn FnMut(&str)>;
type TimecodeCallback = Box<dyn FnMut(f64, &AudioTrack)>;

/// Plays one scene at a time.
pub struct PlaybackController {
    opts: PlaybackOpts,
    scene: Option<Arc<Scene>>,
    clock: Clock,
    ticker: Ticker,
    timelines: TimelineScheduler,
    audio: AudioSynchronizer,
    tree: RenderTree,
    on_choice_selected: Option<ChoiceCallback>,
    on_timecode_hit: Option<TimecodeCallback>,
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("scene", &self.scene.as_ref().map(|s| s.id.as_str()))
            .field("clock", &self.clock)
            .field("timelines", &self.timelines.len())
            .field("audio", &self.audio)
            .finish_non_exhaustive()
    }
}

impl PlaybackController {
    /// Controller with no scene loaded.
    pub fn new(backend: Box<dyn AudioBackend>, opts: PlaybackOpts) -> Self {
        Self {
            audio: AudioSynchronizer::new(backend, &opts),
            ticker: Ticker::new(opts.tick()),
            opts,
            scene: None,
            clock: Clock::new(0.0),
            timelines: TimelineScheduler::new(),
            tree: RenderTree::default(),
            on_choice_selected: None,
            on_timecode_hit: None,
        }
    }

    /// Install the choice-selected callback.
    pub fn on_choice_selected(&mut self, f: impl FnMut(&str) + 'static) {
        self.on_choice_selected = Some(Box::new(f));
    }

    /// Install the cue callback; it receives the cue time and its track.
    pub fn on_timecode_hit(&mut self, f: impl FnMut(f64, &AudioTrack) + 'static) {
        self.on_timecode_hit = Some(Box::new(f));
    }

    /// Make `scene` current.
    ///
    /// Loading the scene that is already current (same `Arc`) is a no-op. Any other scene
    /// tears down all derived state, resets the clock and rebuilds from scratch.
    #[tracing::instrument(skip(self, scene), fields(scene = %scene.id))]
    pub fn load_scene(&mut self, scene: Arc<Scene>) {
        if self
            .scene
            .as_ref()
            .is_some_and(|cur| Arc::ptr_eq(cur, &scene))
        {
            return;
        }
        self.timelines.rebuild(&scene);
        self.audio.rebuild(&scene.audio_tracks);
        self.tree = RenderTree::mount(&scene);
        self.clock = Clock::new(scene.duration);
        if self.opts.autoplay {
            self.clock.play();
        }
        self.ticker.reset();
        self.scene = Some(scene);
        tracing::debug!("scene loaded");
        self.refresh();
    }

    /// Current scene, if any.
    pub fn scene(&self) -> Option<&Arc<Scene>> {
        self.scene.as_ref()
    }

    /// Resume playback.
    pub fn play(&mut self) {
        self.clock.play();
        self.refresh();
    }

    /// Pause playback, keeping the time.
    pub fn pause(&mut self) {
        self.clock.pause();
        self.refresh();
    }

    /// Flip between playing and paused.
    pub fn toggle(&mut self) {
        if self.clock.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Rewind to zero and play.
    pub fn restart(&mut self) {
        self.clock.restart();
        self.refresh();
    }

    /// Jump to `t` seconds, clamped into the scene. Play state is unchanged.
    pub fn seek(&mut self, t: f64) {
        self.clock.seek(t);
        self.refresh();
    }

    /// Run exactly one scheduling interval.
    pub fn tick(&mut self) {
        let step = self.ticker.step();
        self.step_clock(secs(step));
        self.audio.pump(secs(step), &mut self.tree);
    }

    /// Feed `dt` of host time: the clock moves in whole fixed steps, ramps and highlight holds
    /// by exactly `dt`.
    pub fn advance(&mut self, dt: Duration) {
        let step = secs(self.ticker.step());
        for _ in 0..self.ticker.advance(dt) {
            self.step_clock(step);
        }
        self.audio.pump(secs(dt), &mut self.tree);
    }

    fn step_clock(&mut self, dt: f64) {
        if !self.clock.is_playing() {
            return;
        }
        if self.clock.step(dt) {
            tracing::debug!(time = self.clock.current_time(), "scene reached its end");
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        if self.scene.is_none() {
            return;
        }
        let snap = self.clock.snapshot();
        self.timelines.apply(snap, &mut self.tree);
        let on_hit = &mut self.on_timecode_hit;
        self.audio.sync(snap, &mut self.tree, &mut |time, track: &AudioTrack| {
            if let Some(cb) = on_hit.as_mut() {
                cb(time, track);
            }
        });
    }

    /// Crossfade between two tracks of the current scene.
    ///
    /// `duration_ms` defaults to the configured crossfade length.
    pub fn crossfade(
        &mut self,
        from: &str,
        to: &str,
        duration_ms: Option<u64>,
    ) -> StoryResult<()> {
        let ms = duration_ms.unwrap_or(self.opts.default_crossfade_ms);
        self.audio.crossfade(from, to, ms)
    }

    /// Choices whose condition holds for `vars`, in authored order.
    pub fn visible_choices(&self, vars: &Variables) -> Vec<&Choice> {
        let Some(scene) = self.scene.as_deref() else {
            return Vec::new();
        };
        scene
            .choices
            .iter()
            .filter(|c| is_visible(c.condition.as_deref(), vars))
            .collect()
    }

    /// Select a visible choice: apply its variable assignments to `vars`, notify the
    /// choice callback and return the scene it leads to.
    pub fn select_choice(
        &mut self,
        id: &str,
        vars: &mut Variables,
    ) -> StoryResult<Option<String>> {
        let scene = self
            .scene
            .clone()
            .ok_or_else(|| StoryError::validation("no scene loaded"))?;
        let choice = scene
            .choice(id)
            .ok_or_else(|| StoryError::validation(format!("unknown choice '{id}'")))?;
        if !is_visible(choice.condition.as_deref(), vars) {
            return Err(StoryError::evaluation(format!("choice '{id}' is not visible")));
        }
        if let Some(updates) = &choice.variables {
            assign(vars, updates);
        }
        if let Some(cb) = self.on_choice_selected.as_mut() {
            cb(id);
        }
        Ok(choice.target_scene_id.clone())
    }

    /// One clock observation.
    pub fn snapshot(&self) -> ClockSnapshot {
        self.clock.snapshot()
    }

    /// Rendered layers as of the last refresh.
    pub fn render_tree(&self) -> &RenderTree {
        &self.tree
    }

    /// The timeline scheduler.
    pub fn timelines(&self) -> &TimelineScheduler {
        &self.timelines
    }

    /// The audio synchronizer.
    pub fn audio(&self) -> &AudioSynchronizer {
        &self.audio
    }

    /// Release every timeline and transport and forget the scene.
    pub fn dispose(&mut self) {
        self.timelines.dispose();
        self.audio.dispose();
        self.tree = RenderTree::default();
        self.clock = Clock::new(0.0);
        self.ticker.reset();
        self.scene = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/controller.rs"]
mod tests;
