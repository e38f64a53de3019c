use super::*;

fn kf(time: f64, property: AnimatedProperty, value: f64, easing: &str) -> Keyframe {
    Keyframe {
        id: String::new(),
        time,
        property,
        value: KeyValue::Number(value),
        easing: easing.to_owned(),
        easing_params: Vec::new(),
    }
}

fn num(v: Option<KeyValue>) -> f64 {
    v.and_then(|v| v.as_f64()).unwrap()
}

#[test]
fn empty_curve_resolves_to_none() {
    let keys: Vec<Keyframe> = Vec::new();
    assert!(resolve(&keys, 1.0).is_none());
    assert!(PropertyCurve::new(AnimatedProperty::X, &keys).is_none());
}

#[test]
fn boundary_values_are_exact() {
    let keys = vec![
        kf(0.0, AnimatedProperty::X, 3.0, "bounce"),
        kf(0.7, AnimatedProperty::X, -11.25, "elastic"),
        kf(1.3, AnimatedProperty::X, 0.1, "back"),
        kf(4.0, AnimatedProperty::X, 1e6, "ease-in-out"),
    ];
    for k in &keys {
        assert_eq!(resolve(&keys, k.time), Some(k.value.clone()));
    }
}

#[test]
fn clamps_outside_key_range() {
    let keys = vec![
        kf(1.0, AnimatedProperty::Y, 10.0, "linear"),
        kf(2.0, AnimatedProperty::Y, 20.0, "linear"),
    ];
    assert_eq!(num(resolve(&keys, -5.0)), 10.0);
    assert_eq!(num(resolve(&keys, 0.999)), 10.0);
    assert_eq!(num(resolve(&keys, 2.001)), 20.0);
    assert_eq!(num(resolve(&keys, 1e9)), 20.0);
}

#[test]
fn linear_opacity_midpoint() {
    let keys = vec![
        kf(0.0, AnimatedProperty::Opacity, 0.0, "linear"),
        kf(5.0, AnimatedProperty::Opacity, 1.0, "linear"),
    ];
    assert!((num(resolve(&keys, 2.5)) - 0.5).abs() < 1e-12);
}

#[test]
fn easing_comes_from_segment_start() {
    let keys = vec![
        kf(0.0, AnimatedProperty::X, 0.0, "ease-in"),
        kf(1.0, AnimatedProperty::X, 100.0, "ease-out"),
    ];
    // ease-in at 0.5 progress is 0.25; ease-out would give 0.75.
    assert!((num(resolve(&keys, 0.5)) - 25.0).abs() < 1e-9);
}

#[test]
fn duplicate_times_jump_instantly() {
    let keys = vec![
        kf(0.0, AnimatedProperty::X, 0.0, "linear"),
        kf(1.0, AnimatedProperty::X, 10.0, "linear"),
        kf(1.0, AnimatedProperty::X, 50.0, "linear"),
        kf(2.0, AnimatedProperty::X, 60.0, "linear"),
    ];
    assert!((num(resolve(&keys, 0.99)) - 9.9).abs() < 1e-9);
    assert_eq!(num(resolve(&keys, 1.0)), 50.0);
    assert!((num(resolve(&keys, 1.5)) - 55.0).abs() < 1e-9);
}

#[test]
fn text_values_hold_until_next_key() {
    let keys = vec![
        Keyframe {
            value: KeyValue::Text("auto".to_owned()),
            ..kf(0.0, AnimatedProperty::Width, 0.0, "linear")
        },
        kf(2.0, AnimatedProperty::Width, 200.0, "linear"),
    ];
    assert_eq!(resolve(&keys, 1.9), Some(KeyValue::Text("auto".to_owned())));
    assert_eq!(resolve(&keys, 2.0), Some(KeyValue::Number(200.0)));
}

#[test]
fn group_sorts_each_property_independently() {
    let keys = vec![
        kf(2.0, AnimatedProperty::Opacity, 1.0, "linear"),
        kf(1.0, AnimatedProperty::X, 5.0, "linear"),
        kf(0.0, AnimatedProperty::Opacity, 0.0, "linear"),
        kf(0.0, AnimatedProperty::X, 0.0, "linear"),
    ];
    let curves = PropertyCurve::group(&keys);
    assert_eq!(curves.len(), 2);
    assert_eq!(curves[0].property(), AnimatedProperty::X);
    assert_eq!(curves[1].property(), AnimatedProperty::Opacity);
    assert!((curves[1].sample(1.0).as_f64().unwrap() - 0.5).abs() < 1e-12);
    assert_eq!(curves[0].end_time(), 1.0);
    assert_eq!(curves[1].len(), 2);
}

#[test]
fn non_finite_times_are_dropped() {
    let keys = vec![
        kf(f64::NAN, AnimatedProperty::X, 99.0, "linear"),
        kf(0.0, AnimatedProperty::X, 1.0, "linear"),
    ];
    let curve = PropertyCurve::new(AnimatedProperty::X, &keys).unwrap();
    assert_eq!(curve.len(), 1);
    assert_eq!(curve.sample(3.0), KeyValue::Number(1.0));
}
