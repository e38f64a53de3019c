use super::*;
use crate::render::tree::RenderTree;

fn scene() -> Scene {
    Scene::from_json(
        r#"{
            "id": "s1",
            "duration": 5,
            "layers": [
                {"id": "title", "type": "text", "opacity": 0},
                {"id": "hidden", "type": "image", "visible": false}
            ],
            "animations": [
                {"id": "fade", "layerId": "title", "duration": 5, "keyframes": [
                    {"id": "k0", "time": 0, "property": "opacity", "value": 0},
                    {"id": "k1", "time": 5, "property": "opacity", "value": 1}
                ]},
                {"id": "slide", "layerId": "title", "duration": 2, "delay": 1, "keyframes": [
                    {"id": "k2", "time": 0, "property": "x", "value": 0},
                    {"id": "k3", "time": 2, "property": "x", "value": 100}
                ]},
                {"id": "spin", "layerId": "title", "duration": 1, "loop": true, "keyframes": [
                    {"id": "k4", "time": 0, "property": "rotation", "value": 0},
                    {"id": "k5", "time": 1, "property": "rotation", "value": 360}
                ]},
                {"id": "orphan", "layerId": "nope", "duration": 1, "keyframes": []},
                {"id": "ghost", "layerId": "hidden", "duration": 1, "keyframes": [
                    {"id": "k6", "time": 0, "property": "opacity", "value": 1}
                ]}
            ]
        }"#,
    )
    .unwrap()
}

fn snap(t: f64, playing: bool) -> ClockSnapshot {
    ClockSnapshot {
        current_time: t,
        is_playing: playing,
        duration: 5.0,
    }
}

#[test]
fn skips_animations_on_missing_layers() {
    let mut s = TimelineScheduler::new();
    s.rebuild(&scene());
    let ids: Vec<&str> = s.animation_ids().collect();
    assert_eq!(ids, vec!["fade", "slide", "spin", "ghost"]);
    assert_eq!(s.is_playing("orphan"), None);
}

#[test]
fn writes_interpolated_values() {
    let scene = scene();
    let mut tree = RenderTree::mount(&scene);
    let mut s = TimelineScheduler::new();
    s.rebuild(&scene);

    s.apply(snap(2.5, true), &mut tree);
    let title = tree.get("title").unwrap();
    assert!((title.opacity - 0.5).abs() < 1e-12);
    assert!((title.x - 75.0).abs() < 1e-12);
    assert!((title.rotation_deg - 180.0).abs() < 1e-9);
    assert_eq!(s.is_playing("fade"), Some(true));

    // Before the delay the first key holds.
    s.apply(snap(0.5, false), &mut tree);
    assert_eq!(tree.get("title").unwrap().x, 0.0);
    assert_eq!(s.is_playing("slide"), Some(false));

    // Past the end the last key holds.
    s.apply(snap(5.0, false), &mut tree);
    let title = tree.get("title").unwrap();
    assert_eq!(title.x, 100.0);
    assert_eq!(title.opacity, 1.0);
}

#[test]
fn rebuild_is_idempotent() {
    let scene = scene();
    let mut s = TimelineScheduler::new();
    s.rebuild(&scene);
    let first: Vec<String> = s.animation_ids().map(str::to_owned).collect();
    s.rebuild(&scene);
    let second: Vec<String> = s.animation_ids().map(str::to_owned).collect();
    assert_eq!(first, second);
    assert_eq!(s.len(), 4);

    let mut a = RenderTree::mount(&scene);
    let mut b = RenderTree::mount(&scene);
    s.apply(snap(1.7, true), &mut a);
    s.rebuild(&scene);
    s.apply(snap(1.7, true), &mut b);
    assert_eq!(a.layers(), b.layers());
}

#[test]
fn dispose_releases_everything() {
    let mut s = TimelineScheduler::new();
    s.rebuild(&scene());
    s.dispose();
    assert!(s.is_empty());
}
