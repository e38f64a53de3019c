use super::*;

#[test]
fn clamp_secs_bounds_and_non_finite() {
    assert_eq!(clamp_secs(-1.0, 5.0), 0.0);
    assert_eq!(clamp_secs(10.0, 5.0), 5.0);
    assert_eq!(clamp_secs(2.5, 5.0), 2.5);
    assert_eq!(clamp_secs(f64::NAN, 5.0), 0.0);
    assert_eq!(clamp_secs(f64::INFINITY, 5.0), 5.0);
    assert_eq!(clamp_secs(f64::NEG_INFINITY, 5.0), 0.0);
}

#[test]
fn snapshot_remaining_never_negative() {
    let s = ClockSnapshot {
        current_time: 5.0,
        is_playing: false,
        duration: 5.0,
    };
    assert_eq!(s.remaining(), 0.0);
    let s = ClockSnapshot {
        current_time: 1.5,
        ..s
    };
    assert!((s.remaining() - 3.5).abs() < 1e-12);
}
