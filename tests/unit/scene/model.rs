use super::*;
use crate::scene::variables::VarValue;

const SCENE: &str = r##"
{
  "id": "intro",
  "name": "Intro",
  "duration": 5,
  "layers": [
    { "id": "bg", "name": "Sky", "type": "background", "order": 0, "visible": true,
      "locked": false, "x": 0, "y": 0, "width": 800, "height": 600, "rotation": 0,
      "opacity": 1, "scale": 1, "backgroundColor": "#112233" },
    { "id": "title", "type": "text", "order": 2, "textContent": "Hello",
      "fontWeight": "bold", "textAlign": "center" }
  ],
  "animations": [
    { "id": "fade", "layerId": "title", "name": "Fade", "duration": 5, "delay": 0.5,
      "loop": false, "trigger": "onLoad",
      "keyframes": [
        { "id": "k0", "time": 0, "property": "opacity", "value": 0, "easing": "linear" },
        { "id": "k1", "time": 5, "property": "opacity", "value": 1, "easing": "steps",
          "easingParams": [4] }
      ] }
  ],
  "audioTracks": [
    { "id": "music", "url": "music.mp3", "name": "Theme", "volume": 0.8, "loop": true,
      "crossfadeIn": 1.5,
      "timecodes": [ { "time": 2, "layerId": "title", "action": "highlight", "text": "now" } ] }
  ],
  "choices": [
    { "id": "open", "text": "Open the door", "targetSceneId": "hall",
      "condition": "variables.hasKey === true", "variables": { "doorOpen": true } }
  ],
  "variables": { "hasKey": false },
  "transitions": { "in": "fade", "out": "slide" }
}
"##;

#[test]
fn parses_authoring_json() {
    let scene = Scene::from_json(SCENE).unwrap();
    scene.validate().unwrap();

    assert_eq!(scene.layers.len(), 2);
    let title = scene.layer("title").unwrap();
    assert_eq!(title.kind, LayerKind::Text);
    assert!(title.visible);
    assert_eq!(title.opacity, 1.0);
    assert_eq!(title.text_align, Some(TextAlign::Center));

    let anim = &scene.animations[0];
    assert_eq!(anim.delay_secs(), 0.5);
    assert!(!anim.loops());
    assert_eq!(anim.trigger, Trigger::OnLoad);
    assert_eq!(anim.keyframes[1].ease(), Ease::Steps(4));

    let track = scene.audio_track("music").unwrap();
    assert!(track.looping);
    assert_eq!(track.crossfade_in, Some(1.5));
    assert_eq!(
        track.timecodes[0].action,
        Some(TimecodeAction::Highlight)
    );

    let choice = scene.choice("open").unwrap();
    assert_eq!(choice.target_scene_id.as_deref(), Some("hall"));
    assert_eq!(
        choice.variables.as_ref().unwrap()["doorOpen"],
        VarValue::Bool(true)
    );

    let tr = scene.transitions.as_ref().unwrap();
    assert_eq!(tr.enter.as_deref(), Some("fade"));
    assert_eq!(tr.exit.as_deref(), Some("slide"));
}

#[test]
fn rejects_non_positive_duration() {
    let mut scene = Scene::from_json(SCENE).unwrap();
    scene.duration = 0.0;
    let err = scene.validate().unwrap_err().to_string();
    assert!(err.contains("$.duration"), "{err}");
}

#[test]
fn rejects_keyframe_outside_animation() {
    let mut scene = Scene::from_json(SCENE).unwrap();
    scene.animations[0].keyframes[1].time = 6.0;
    let err = scene.validate().unwrap_err().to_string();
    assert!(err.contains("$.animations[0].keyframes[1]"), "{err}");
}

#[test]
fn rejects_duplicate_layer_ids_and_bad_volume() {
    let mut scene = Scene::from_json(SCENE).unwrap();
    scene.layers[1].id = "bg".to_owned();
    scene.audio_tracks[0].volume = 1.5;
    let err = scene.validate().unwrap_err().to_string();
    assert!(err.contains("duplicate id 'bg'"), "{err}");
    assert!(err.contains("volume"), "{err}");
}

#[test]
fn missing_layer_reference_is_not_a_validation_error() {
    let mut scene = Scene::from_json(SCENE).unwrap();
    scene.animations[0].layer_id = "ghost".to_owned();
    scene.validate().unwrap();
}

#[test]
fn project_start_scene_falls_back_to_first() {
    let json = format!(
        r#"{{ "id": "p", "scenes": [{SCENE}], "globalVariables": {{ "gold": 3 }} }}"#
    );
    let project = Project::from_json(&json).unwrap();
    project.validate().unwrap();
    assert_eq!(project.start_scene().unwrap().id, "intro");
    assert_eq!(project.global_variables["gold"], VarValue::Number(3.0));
}

#[test]
fn project_rejects_unknown_start_scene() {
    let json = format!(r#"{{ "id": "p", "scenes": [{SCENE}], "currentSceneId": "nowhere" }}"#);
    let project = Project::from_json(&json).unwrap();
    let err = project.validate().unwrap_err().to_string();
    assert!(err.contains("currentSceneId"), "{err}");
}
