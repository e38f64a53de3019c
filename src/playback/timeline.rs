//! Timeline Scheduler.
//!
//! One runtime timeline per animation whose target layer exists. Each tick every timeline
//! resolves all of its property curves at the same animation-local time and writes the encoded
//! values onto the layer's visual.

use crate::animation::curve::PropertyCurve;
use crate::animation::property::PropertyValue;
use crate::foundation::core::ClockSnapshot;
use crate::render::tree::LayerSurface;
use crate::scene::model::{Animation, Scene};
use std::collections::HashMap;

#[derive(Clone, Debug)]
struct Timeline {
    animation_id: String,
    layer_id: String,
    delay: f64,
    duration: f64,
    looping: bool,
    curves: Vec<PropertyCurve>,
    playing: bool,
}

impl Timeline {
    fn build(anim: &Animation) -> Self {
        Self {
            animation_id: anim.id.clone(),
            layer_id: anim.layer_id.clone(),
            delay: anim.delay_secs(),
            duration: anim.duration.max(0.0),
            looping: anim.loops(),
            curves: PropertyCurve::group(&anim.keyframes),
            playing: false,
        }
    }

    /// Animation-local time for scene time `t`.
    fn local_time(&self, t: f64) -> f64 {
        let local = t - self.delay;
        if local.is_nan() || local <= 0.0 {
            return 0.0;
        }
        if self.looping && self.duration > 0.0 {
            local.rem_euclid(self.duration)
        } else {
            local.min(self.duration)
        }
    }
}

/// Owns the per-animation runtime timelines of the current scene.
#[derive(Debug, Default)]
pub struct TimelineScheduler {
    timelines: Vec<Timeline>,
    index: HashMap<String, usize>,
}

impl TimelineScheduler {
    /// Empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tear down every timeline and build fresh ones for `scene`.
    ///
    /// Animations whose `layerId` names no layer in the scene are skipped.
    #[tracing::instrument(skip(self, scene), fields(scene = %scene.id))]
    pub fn rebuild(&mut self, scene: &Scene) {
        self.dispose();
        for anim in &scene.animations {
            if scene.layer(&anim.layer_id).is_none() {
                tracing::warn!(
                    animation = %anim.id,
                    layer = %anim.layer_id,
                    "animation targets a missing layer; skipped"
                );
                continue;
            }
            if self.index.contains_key(&anim.id) {
                continue;
            }
            self.index.insert(anim.id.clone(), self.timelines.len());
            self.timelines.push(Timeline::build(anim));
        }
        tracing::debug!(timelines = self.timelines.len(), "timelines rebuilt");
    }

    /// Sync every timeline's play state with `snap` and write all curves at the snapshot time.
    ///
    /// A layer that is not mounted in `surface` is skipped for this frame.
    pub fn apply(&mut self, snap: ClockSnapshot, surface: &mut dyn LayerSurface) {
        for tl in &mut self.timelines {
            tl.playing = snap.is_playing;
            let Some(visual) = surface.layer_mut(&tl.layer_id) else {
                continue;
            };
            let local = tl.local_time(snap.current_time);
            for curve in &tl.curves {
                let value = PropertyValue::encode(curve.property(), &curve.sample(local));
                visual.apply(curve.property(), &value);
            }
        }
    }

    /// Release every timeline.
    pub fn dispose(&mut self) {
        self.timelines.clear();
        self.index.clear();
    }

    /// Number of live timelines.
    pub fn len(&self) -> usize {
        self.timelines.len()
    }

    /// `true` when no timeline is live.
    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    /// Whether the timeline for `animation_id` is playing; `None` if it was never built.
    pub fn is_playing(&self, animation_id: &str) -> Option<bool> {
        self.index
            .get(animation_id)
            .map(|&i| self.timelines[i].playing)
    }

    /// Ids of the live timelines, in authored order.
    pub fn animation_ids(&self) -> impl Iterator<Item = &str> {
        self.timelines.iter().map(|t| t.animation_id.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/timeline.rs"]
mod tests;
