//! Storyplay is a scene playback engine for interactive fiction.
//!
//! A scene is a fixed-duration bundle of layers, keyframe animations, audio tracks with cues
//! and reader choices. One clock drives everything:
//!
//! - Load a [`Scene`] (or a whole [`Project`]) from JSON and validate it
//! - Hand it to a [`PlaybackController`] (or a [`ProjectPlayer`]) with an [`AudioBackend`]
//! - Feed host time through [`PlaybackController::advance`] and draw the [`RenderTree`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod audio;
/// Engine options.
pub mod config;
pub(crate) mod expression;
pub(crate) mod playback;
pub(crate) mod render;
pub(crate) mod scene;

pub use crate::foundation::core::{Affine, ClockSnapshot, Vec2, clamp_secs};
pub use crate::foundation::error::{StoryError, StoryResult};

pub use crate::animation::curve::{CurvePoint, PropertyCurve, resolve};
pub use crate::animation::ease::Ease;
pub use crate::animation::property::{AnimatedProperty, KeyValue, PropertyValue};
pub use crate::audio::backend::{AudioBackend, LoadState, Transport};
pub use crate::audio::memory::{MemoryBackend, VoiceState};
pub use crate::audio::sync::AudioSynchronizer;
pub use crate::config::PlaybackOpts;
pub use crate::expression::condition::{Condition, is_visible};
pub use crate::expression::error::ExprError;
pub use crate::playback::clock::Clock;
pub use crate::playback::controller::PlaybackController;
pub use crate::playback::project::{ChoiceOutcome, ProjectPlayer};
pub use crate::playback::ticker::Ticker;
pub use crate::playback::timeline::TimelineScheduler;
pub use crate::render::tree::{LayerSurface, LayerVisual, RenderTree};
pub use crate::scene::model::{
    Animation, AudioTimecode, AudioTrack, Choice, Keyframe, Layer, LayerKind, Project,
    ProjectSettings, Scene, SceneTransitions, TextAlign, TimecodeAction, Trigger, TriggerParams,
};
pub use crate::scene::variables::{VarValue, Variables, assign};
