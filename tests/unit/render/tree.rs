use super::*;
use kurbo::Point;

fn scene() -> Scene {
    Scene::from_json(
        r##"{
            "id": "s1",
            "duration": 5,
            "layers": [
                {"id": "fg", "type": "text", "order": 2, "textContent": "Hello", "x": 10, "y": 20,
                 "width": 100, "height": 50},
                {"id": "bg", "type": "background", "order": 0, "backgroundColor": "#000"},
                {"id": "ghost", "type": "image", "order": 1, "visible": false},
                {"id": "mid", "type": "shape", "order": 2}
            ]
        }"##,
    )
    .unwrap()
}

#[test]
fn mounts_visible_layers_in_stable_order() {
    let tree = RenderTree::mount(&scene());
    let ids: Vec<&str> = tree.layers().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["bg", "fg", "mid"]);
    assert!(tree.get("ghost").is_none());
    assert_eq!(tree.get("fg").unwrap().content.as_deref(), Some("Hello"));
    assert_eq!(tree.get("bg").unwrap().content.as_deref(), Some("#000"));
}

#[test]
fn apply_clamps_and_encodes() {
    let mut tree = RenderTree::mount(&scene());
    let fg = tree.layer_mut("fg").unwrap();
    fg.apply(AnimatedProperty::Opacity, &PropertyValue::Number(1.5));
    fg.apply(AnimatedProperty::Blur, &PropertyValue::BlurRadius(4.0));
    fg.apply(AnimatedProperty::Rotation, &PropertyValue::Degrees(45.0));
    fg.apply(AnimatedProperty::X, &PropertyValue::Text("left".to_owned()));
    assert_eq!(fg.opacity, 1.0);
    assert_eq!(fg.x, 10.0);
    assert_eq!(fg.style(AnimatedProperty::Blur).to_string(), "blur(4px)");
    assert_eq!(fg.style(AnimatedProperty::Rotation).to_string(), "45deg");
    assert_eq!(fg.style(AnimatedProperty::Width).to_string(), "100px");
    assert!(tree.layer_mut("ghost").is_none());
}

#[test]
fn affine_rotates_about_center() {
    let mut tree = RenderTree::mount(&scene());
    let fg = tree.layer_mut("fg").unwrap();
    let center = Point::new(50.0, 25.0);
    assert_eq!(fg.affine() * Point::ORIGIN, Point::new(10.0, 20.0));

    fg.apply(AnimatedProperty::Rotation, &PropertyValue::Degrees(90.0));
    fg.apply(AnimatedProperty::Scale, &PropertyValue::Number(2.0));
    let c = fg.affine() * center;
    assert!((c.x - 60.0).abs() < 1e-9 && (c.y - 45.0).abs() < 1e-9);
}
