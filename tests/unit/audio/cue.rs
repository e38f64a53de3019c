use super::*;

fn cue(time: f64) -> AudioTimecode {
    AudioTimecode {
        time,
        text: None,
        layer_id: None,
        action: None,
    }
}

fn sweep(tracker: &mut CueTracker, cues: &[AudioTimecode], from: f64, to: f64) -> usize {
    let mut fired = 0;
    let mut t = from;
    while t <= to {
        fired += tracker.observe(cues, t, true).len();
        t += 0.016;
    }
    fired
}

#[test]
fn fires_once_per_forward_crossing() {
    let cues = [cue(2.0)];
    let mut tracker = CueTracker::new(1, 0.1);
    assert_eq!(sweep(&mut tracker, &cues, 1.9, 2.3), 1);
    // Still past the cue: no re-fire.
    assert_eq!(sweep(&mut tracker, &cues, 2.0, 2.09), 0);
    // Seek back before the cue and sweep forward again.
    assert!(tracker.observe(&cues, 1.5, true).is_empty());
    assert_eq!(sweep(&mut tracker, &cues, 1.5, 2.5), 1);
}

#[test]
fn paused_clock_never_fires() {
    let cues = [cue(2.0)];
    let mut tracker = CueTracker::new(1, 0.1);
    assert!(tracker.observe(&cues, 2.05, false).is_empty());
    assert_eq!(tracker.observe(&cues, 2.06, true), vec![0]);
}

#[test]
fn landing_past_the_window_does_not_fire() {
    let cues = [cue(2.0), cue(2.05)];
    let mut tracker = CueTracker::new(2, 0.1);
    assert!(tracker.observe(&cues, 3.0, true).is_empty());
    assert_eq!(tracker.observe(&cues, 2.06, true), vec![0, 1]);
}

#[test]
fn highlights_expire_and_restart() {
    let mut h = Highlights::default();
    h.hold("a", 0.5);
    assert!(h.advance(0.3).is_empty());
    h.hold("a", 0.5);
    assert!(h.advance(0.3).is_empty());
    assert_eq!(h.advance(0.2), vec!["a".to_owned()]);
    assert_eq!(h.len(), 0);
}
