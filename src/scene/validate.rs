use crate::foundation::error::{StoryError, StoryResult};
use crate::scene::model::{Animation, AudioTrack, Project, Scene};
use std::collections::HashSet;
use std::fmt;

// Keyframe times are authored in floating point editors; allow a hair of slack at the ends.
const TIME_SLACK: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaError {
    pub(crate) path: Vec<PathElem>,
    pub(crate) message: String,
}

impl SchemaError {
    fn at(path: &[PathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[PathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            PathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            PathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

fn into_result(errors: Vec<SchemaError>) -> StoryResult<()> {
    if errors.is_empty() {
        return Ok(());
    }
    let joined = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(StoryError::validation(joined))
}

pub(crate) fn validate_scene(scene: &Scene) -> StoryResult<()> {
    let mut errors = Vec::new();
    check_scene(scene, &mut Vec::new(), &mut errors);
    into_result(errors)
}

pub(crate) fn validate_project(project: &Project) -> StoryResult<()> {
    let mut errors = Vec::new();
    let mut path = vec![PathElem::Field("scenes")];

    if project.scenes.is_empty() {
        errors.push(SchemaError::at(&path, "project must contain at least one scene"));
    }

    let mut seen = HashSet::new();
    for (i, scene) in project.scenes.iter().enumerate() {
        path.push(PathElem::Index(i));
        if !seen.insert(scene.id.as_str()) {
            errors.push(SchemaError::at(
                &path,
                format!("duplicate scene id '{}'", scene.id),
            ));
        }
        check_scene(scene, &mut path, &mut errors);
        path.pop();
    }

    if !project.current_scene_id.is_empty() && project.scene(&project.current_scene_id).is_none()
    {
        errors.push(SchemaError::at(
            &[PathElem::Field("currentSceneId")],
            format!("unknown scene '{}'", project.current_scene_id),
        ));
    }

    into_result(errors)
}

fn check_scene(scene: &Scene, path: &mut Vec<PathElem>, errors: &mut Vec<SchemaError>) {
    if !(scene.duration.is_finite() && scene.duration > 0.0) {
        path.push(PathElem::Field("duration"));
        errors.push(SchemaError::at(path, "scene duration must be > 0"));
        path.pop();
    }

    check_unique_ids(
        scene.layers.iter().map(|l| l.id.as_str()),
        "layers",
        path,
        errors,
    );
    check_unique_ids(
        scene.animations.iter().map(|a| a.id.as_str()),
        "animations",
        path,
        errors,
    );
    check_unique_ids(
        scene.audio_tracks.iter().map(|t| t.id.as_str()),
        "audioTracks",
        path,
        errors,
    );
    check_unique_ids(
        scene.choices.iter().map(|c| c.id.as_str()),
        "choices",
        path,
        errors,
    );

    path.push(PathElem::Field("animations"));
    for (i, anim) in scene.animations.iter().enumerate() {
        path.push(PathElem::Index(i));
        check_animation(anim, path, errors);
        path.pop();
    }
    path.pop();

    path.push(PathElem::Field("audioTracks"));
    for (i, track) in scene.audio_tracks.iter().enumerate() {
        path.push(PathElem::Index(i));
        check_track(track, path, errors);
        path.pop();
    }
    path.pop();
}

fn check_unique_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    field: &'static str,
    path: &mut Vec<PathElem>,
    errors: &mut Vec<SchemaError>,
) {
    let mut seen = HashSet::new();
    path.push(PathElem::Field(field));
    for (i, id) in ids.enumerate() {
        if !seen.insert(id) {
            path.push(PathElem::Index(i));
            errors.push(SchemaError::at(path, format!("duplicate id '{id}'")));
            path.pop();
        }
    }
    path.pop();
}

fn check_animation(anim: &Animation, path: &mut Vec<PathElem>, errors: &mut Vec<SchemaError>) {
    if !(anim.duration.is_finite() && anim.duration >= 0.0) {
        errors.push(SchemaError::at(path, "animation duration must be >= 0"));
        return;
    }
    if let Some(delay) = anim.delay
        && !(delay.is_finite() && delay >= 0.0)
    {
        errors.push(SchemaError::at(path, "animation delay must be >= 0"));
    }

    path.push(PathElem::Field("keyframes"));
    for (i, kf) in anim.keyframes.iter().enumerate() {
        if !kf.time.is_finite()
            || kf.time < -TIME_SLACK
            || kf.time > anim.duration + TIME_SLACK
        {
            path.push(PathElem::Index(i));
            errors.push(SchemaError::at(
                path,
                format!(
                    "keyframe time {} outside [0, {}]",
                    kf.time, anim.duration
                ),
            ));
            path.pop();
        }
    }
    path.pop();
}

fn check_track(track: &AudioTrack, path: &mut Vec<PathElem>, errors: &mut Vec<SchemaError>) {
    if !(track.volume.is_finite() && (0.0..=1.0).contains(&track.volume)) {
        errors.push(SchemaError::at(path, "track volume must be in [0, 1]"));
    }
    for (name, v) in [
        ("crossfadeIn", track.crossfade_in),
        ("crossfadeOut", track.crossfade_out),
    ] {
        if let Some(v) = v
            && !(v.is_finite() && v >= 0.0)
        {
            path.push(PathElem::Field(name));
            errors.push(SchemaError::at(path, "crossfade must be >= 0"));
            path.pop();
        }
    }
    path.push(PathElem::Field("timecodes"));
    for (i, tc) in track.timecodes.iter().enumerate() {
        if !(tc.time.is_finite() && tc.time >= 0.0) {
            path.push(PathElem::Index(i));
            errors.push(SchemaError::at(path, "timecode time must be >= 0"));
            path.pop();
        }
    }
    path.pop();
}
