use super::*;

const ALL: [Ease; 9] = [
    Ease::Linear,
    Ease::EaseIn,
    Ease::EaseOut,
    Ease::EaseInOut,
    Ease::Bounce,
    Ease::Elastic,
    Ease::Back,
    Ease::CubicBezier {
        x1: 0.25,
        y1: 0.1,
        x2: 0.25,
        y2: 1.0,
    },
    Ease::Steps(4),
];

#[test]
fn endpoints_are_fixed() {
    for e in ALL {
        assert!(e.apply(0.0).abs() < 1e-9, "{e:?} at 0");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-9, "{e:?} at 1");
    }
}

#[test]
fn input_is_clamped() {
    for e in ALL {
        assert_eq!(e.apply(-3.0), e.apply(0.0));
        assert_eq!(e.apply(7.0), e.apply(1.0));
    }
}

#[test]
fn authored_names_resolve() {
    assert_eq!(Ease::from_authored("linear", &[]), Ease::Linear);
    assert_eq!(Ease::from_authored("ease-in", &[]), Ease::EaseIn);
    assert_eq!(Ease::from_authored("ease-out", &[]), Ease::EaseOut);
    assert_eq!(Ease::from_authored("ease-in-out", &[]), Ease::EaseInOut);
    assert_eq!(Ease::from_authored("bounce", &[]), Ease::Bounce);
    assert_eq!(Ease::from_authored("elastic", &[]), Ease::Elastic);
    assert_eq!(Ease::from_authored("back", &[]), Ease::Back);
    assert_eq!(Ease::from_authored("steps", &[3.0, 9.0]), Ease::Steps(3));
}

#[test]
fn unknown_or_malformed_falls_back_to_linear() {
    assert_eq!(Ease::from_authored("wobble", &[]), Ease::Linear);
    assert_eq!(Ease::from_authored("cubic-bezier", &[0.1, 0.2, 0.3]), Ease::Linear);
    assert_eq!(
        Ease::from_authored("cubic-bezier", &[0.1, 0.2, 0.3, 0.4, 0.5]),
        Ease::Linear
    );
    assert_eq!(Ease::from_authored("steps", &[]), Ease::Linear);
    assert_eq!(Ease::from_authored("steps", &[0.0]), Ease::Linear);
}

#[test]
fn quadratic_shapes() {
    assert!((Ease::EaseIn.apply(0.5) - 0.25).abs() < 1e-12);
    assert!((Ease::EaseOut.apply(0.5) - 0.75).abs() < 1e-12);
    assert!((Ease::EaseInOut.apply(0.5) - 0.5).abs() < 1e-12);
}

#[test]
fn back_overshoots_and_steps_quantize() {
    let peak = (1..100)
        .map(|i| Ease::Back.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);

    let s = Ease::Steps(4);
    assert_eq!(s.apply(0.1), 0.0);
    assert_eq!(s.apply(0.26), 0.25);
    assert_eq!(s.apply(0.99), 0.75);
}

#[test]
fn linear_bezier_matches_identity() {
    let e = Ease::from_authored("cubic-bezier", &[0.0, 0.0, 1.0, 1.0]);
    for i in 0..=10 {
        let t = f64::from(i) / 10.0;
        assert!((e.apply(t) - t).abs() < 1e-5, "t={t}");
    }
}

#[test]
fn ease_bezier_is_monotonic() {
    let e = Ease::from_authored("cubic-bezier", &[0.42, 0.0, 0.58, 1.0]);
    let mut prev = 0.0;
    for i in 1..=50 {
        let v = e.apply(f64::from(i) / 50.0);
        assert!(v + 1e-9 >= prev);
        prev = v;
    }
}
