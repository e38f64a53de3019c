use crate::animation::ease::Ease;
use crate::animation::property::{AnimatedProperty, KeyValue};
use crate::foundation::error::{StoryError, StoryResult};
use crate::scene::validate::{validate_project, validate_scene};
use crate::scene::variables::Variables;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One playable scene as produced by the authoring tool.
///
/// The engine treats a scene as immutable input. Replacing the scene (a new
/// `Arc<Scene>`) is what triggers a rebuild of all derived runtime state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Scene identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Authored duration in seconds (`> 0`).
    pub duration: f64,
    /// Visual layers, rendered by ascending `order`.
    #[serde(default)]
    pub layers: Vec<Layer>,
    /// Keyframe animations, each targeting one layer.
    #[serde(default)]
    pub animations: Vec<Animation>,
    /// Audio tracks phase-locked to the scene clock.
    #[serde(default)]
    pub audio_tracks: Vec<AudioTrack>,
    /// Choices offered to the reader.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Scene-local variables.
    #[serde(default)]
    pub variables: Variables,
    /// Optional enter/exit transition names.
    #[serde(default)]
    pub transitions: Option<SceneTransitions>,
    /// Free-form authoring notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl Scene {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> StoryResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| StoryError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON string.
    pub fn from_json(s: &str) -> StoryResult<Self> {
        serde_json::from_str(s).map_err(|e| StoryError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StoryResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StoryError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check structural invariants (positive duration, keyframe ranges, volumes, unique ids).
    pub fn validate(&self) -> StoryResult<()> {
        validate_scene(self)
    }

    /// Look up a layer by id.
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Look up an audio track by id.
    pub fn audio_track(&self, id: &str) -> Option<&AudioTrack> {
        self.audio_tracks.iter().find(|t| t.id == id)
    }

    /// Look up a choice by id.
    pub fn choice(&self, id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == id)
    }
}

/// Names of the transitions played when entering and leaving a scene.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SceneTransitions {
    /// Transition played when the scene is entered.
    #[serde(default, rename = "in")]
    pub enter: Option<String>,
    /// Transition played when the scene is left.
    #[serde(default, rename = "out")]
    pub exit: Option<String>,
}

/// Visual element type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Full-frame backdrop.
    Background,
    /// Still image.
    Image,
    /// Looping muted video.
    Video,
    /// Text block.
    Text,
    /// Sprite.
    Sprite,
    /// Filled shape.
    Shape,
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Left aligned.
    Left,
    /// Centered.
    Center,
    /// Right aligned.
    Right,
}

/// A positioned visual element.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// Layer identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Element type.
    #[serde(rename = "type")]
    pub kind: LayerKind,
    /// Z-order; higher renders on top.
    #[serde(default)]
    pub order: i64,
    /// Hidden layers are not mounted.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Editor lock flag; ignored during playback.
    #[serde(default)]
    pub locked: bool,
    /// Left edge in pixels.
    #[serde(default)]
    pub x: f64,
    /// Top edge in pixels.
    #[serde(default)]
    pub y: f64,
    /// Width in pixels.
    #[serde(default)]
    pub width: f64,
    /// Height in pixels.
    #[serde(default)]
    pub height: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Opacity in `[0, 1]`.
    #[serde(default = "default_one")]
    pub opacity: f64,
    /// Uniform scale.
    #[serde(default = "default_one")]
    pub scale: f64,
    /// Blur radius in pixels.
    #[serde(default)]
    pub blur: Option<f64>,
    /// Generic content payload.
    #[serde(default)]
    pub content: Option<String>,
    /// Image source for `image` layers.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Video source for `video` layers.
    #[serde(default)]
    pub video_url: Option<String>,
    /// Fill color for `shape` and `background` layers.
    #[serde(default)]
    pub background_color: Option<String>,
    /// Text for `text` layers.
    #[serde(default)]
    pub text_content: Option<String>,
    /// Font size in pixels.
    #[serde(default)]
    pub font_size: Option<f64>,
    /// Font family name.
    #[serde(default)]
    pub font_family: Option<String>,
    /// CSS-like weight, either numeric or a keyword.
    #[serde(default)]
    pub font_weight: Option<KeyValue>,
    /// Text alignment.
    #[serde(default)]
    pub text_align: Option<TextAlign>,
    /// Text color.
    #[serde(default)]
    pub color: Option<String>,
}

/// What starts an animation. Only the clock-driven path is implemented; the rest are reserved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trigger {
    /// Runs from scene start.
    #[default]
    OnLoad,
    /// Reserved.
    OnClick,
    /// Reserved.
    AfterAnimation,
    /// Reserved.
    AtTime,
    /// Reserved.
    OnChoice,
}

/// Parameters for event-driven triggers.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerParams {
    /// Layer for `afterAnimation`/`onClick`.
    #[serde(default)]
    pub target_layer_id: Option<String>,
    /// Seconds for `atTime`.
    #[serde(default)]
    pub time: Option<f64>,
    /// Choice for `onChoice`.
    #[serde(default)]
    pub choice_id: Option<String>,
}

/// Keyframe-driven property changes applied to one layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    /// Animation identifier.
    pub id: String,
    /// Target layer.
    pub layer_id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Keyframes for any number of properties, in any order.
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
    /// Authored duration in seconds.
    pub duration: f64,
    /// Start offset in seconds relative to scene start.
    #[serde(default)]
    pub delay: Option<f64>,
    /// Wrap local time instead of holding the last value.
    #[serde(default, rename = "loop")]
    pub looping: Option<bool>,
    /// Start trigger.
    #[serde(default)]
    pub trigger: Trigger,
    /// Trigger parameters.
    #[serde(default)]
    pub trigger_params: Option<TriggerParams>,
}

impl Animation {
    /// Delay in seconds, `0` when absent.
    pub fn delay_secs(&self) -> f64 {
        self.delay.unwrap_or(0.0)
    }

    /// Whether the animation loops.
    pub fn loops(&self) -> bool {
        self.looping.unwrap_or(false)
    }
}

/// An authored `(time, value, easing)` sample for one property.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    /// Keyframe identifier.
    #[serde(default)]
    pub id: String,
    /// Seconds relative to the animation's delay-adjusted start.
    pub time: f64,
    /// Driven property.
    pub property: AnimatedProperty,
    /// Value at `time`.
    pub value: KeyValue,
    /// Easing applied from this keyframe toward the next one.
    #[serde(default = "default_easing")]
    pub easing: String,
    /// Parameters for `cubic-bezier` and `steps`.
    #[serde(default)]
    pub easing_params: Vec<f64>,
}

impl Keyframe {
    /// Resolve the authored easing identifier.
    pub fn ease(&self) -> Ease {
        Ease::from_authored(&self.easing, &self.easing_params)
    }
}

/// Cue side effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimecodeAction {
    /// Briefly highlight the associated layer.
    Highlight,
    /// Reserved.
    Show,
    /// Reserved.
    Hide,
    /// Reserved.
    Animate,
}

/// An authored instant on an audio track's timeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTimecode {
    /// Seconds on the scene clock.
    pub time: f64,
    /// Caption text.
    #[serde(default)]
    pub text: Option<String>,
    /// Layer the action applies to.
    #[serde(default)]
    pub layer_id: Option<String>,
    /// Side effect fired with the cue.
    #[serde(default)]
    pub action: Option<TimecodeAction>,
}

/// An audio source played in lockstep with the scene clock.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrack {
    /// Track identifier.
    pub id: String,
    /// Source URL.
    pub url: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Volume in `[0, 1]`.
    #[serde(default = "default_one_f32")]
    pub volume: f32,
    /// Loop at end of source.
    #[serde(default, rename = "loop")]
    pub looping: bool,
    /// Cue points.
    #[serde(default)]
    pub timecodes: Vec<AudioTimecode>,
    /// Fade-in window in seconds from scene start.
    #[serde(default)]
    pub crossfade_in: Option<f64>,
    /// Fade-out window in seconds before scene end.
    #[serde(default)]
    pub crossfade_out: Option<f64>,
}

/// A reader choice, optionally gated by a condition.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Choice identifier.
    pub id: String,
    /// Button text.
    pub text: String,
    /// Scene to go to when selected.
    #[serde(default)]
    pub target_scene_id: Option<String>,
    /// Visibility condition, e.g. `variables.hasKey === true`.
    #[serde(default)]
    pub condition: Option<String>,
    /// Variable assignments applied on selection.
    #[serde(default)]
    pub variables: Option<Variables>,
}

/// A set of scenes plus project-wide state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Scenes, in authoring order.
    pub scenes: Vec<Scene>,
    /// Variables shared across scenes.
    #[serde(default)]
    pub global_variables: Variables,
    /// Scene to start from; the first scene when empty.
    #[serde(default)]
    pub current_scene_id: String,
    /// Presentation settings.
    #[serde(default)]
    pub settings: Option<ProjectSettings>,
}

impl Project {
    /// Parse a project from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> StoryResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| StoryError::serde(format!("parse project JSON: {e}")))
    }

    /// Parse a project from a JSON string.
    pub fn from_json(s: &str) -> StoryResult<Self> {
        serde_json::from_str(s).map_err(|e| StoryError::serde(format!("parse project JSON: {e}")))
    }

    /// Parse a project from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StoryResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StoryError::validation(format!("open project JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate every scene plus project-level references.
    pub fn validate(&self) -> StoryResult<()> {
        validate_project(self)
    }

    /// Look up a scene by id.
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    /// The scene playback starts from.
    pub fn start_scene(&self) -> Option<&Scene> {
        self.scene(&self.current_scene_id).or_else(|| self.scenes.first())
    }
}

/// Presentation settings for a project.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    /// Stage width in pixels.
    pub width: u32,
    /// Stage height in pixels.
    pub height: u32,
    /// Stage background color.
    #[serde(default)]
    pub background_color: Option<String>,
    /// Font used when a text layer has none.
    #[serde(default)]
    pub default_font_family: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_one() -> f64 {
    1.0
}

fn default_one_f32() -> f32 {
    1.0
}

fn default_easing() -> String {
    "linear".to_owned()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
