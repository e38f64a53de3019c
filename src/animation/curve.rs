//! Keyframe curve resolution.
//!
//! A curve is the sorted keyframe list for one `(layer, property)` pair. Resolution is a pure
//! function of the keys and the query time:
//!
//! - before the first key the first value holds, after the last key the last value holds;
//! - between `kf[i]` and `kf[i + 1]` the easing named at `kf[i]` shapes the blend;
//! - keys sharing a time form a zero-length segment, i.e. an instantaneous jump.

use crate::animation::ease::Ease;
use crate::animation::property::{AnimatedProperty, KeyValue};
use crate::scene::model::Keyframe;
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// A point on a property curve.
pub trait CurvePoint {
    /// Curve-local time in seconds.
    fn time(&self) -> f64;
    /// Value at [`CurvePoint::time`].
    fn value(&self) -> &KeyValue;
    /// Easing toward the next point.
    fn ease(&self) -> Ease;
}

impl CurvePoint for Keyframe {
    fn time(&self) -> f64 {
        self.time
    }

    fn value(&self) -> &KeyValue {
        &self.value
    }

    fn ease(&self) -> Ease {
        Keyframe::ease(self)
    }
}

/// Resolve the value of a sorted curve at time `t`.
///
/// `keys` must be sorted ascending by time. Returns `None` only for an empty curve.
pub fn resolve<P: CurvePoint>(keys: &[P], t: f64) -> Option<KeyValue> {
    let first = keys.first()?;
    let idx = keys.partition_point(|k| k.time() <= t);

    if idx == 0 {
        return Some(first.value().clone());
    }
    let a = &keys[idx - 1];
    let Some(b) = keys.get(idx) else {
        return Some(a.value().clone());
    };

    let offset = t - a.time();
    if offset <= 0.0 {
        return Some(a.value().clone());
    }

    // `b.time() > t >= a.time()`, so the span is strictly positive here.
    let span = b.time() - a.time();
    let eased = a.ease().apply(offset / span);
    Some(blend(a.value(), b.value(), eased))
}

fn blend(a: &KeyValue, b: &KeyValue, t: f64) -> KeyValue {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => KeyValue::Number(x + (y - x) * t),
        // Non-numeric values cannot blend; hold until the next key is reached.
        _ => a.clone(),
    }
}

#[derive(Clone, Debug)]
struct CurveKey {
    time: f64,
    value: KeyValue,
    ease: Ease,
}

impl CurvePoint for CurveKey {
    fn time(&self) -> f64 {
        self.time
    }

    fn value(&self) -> &KeyValue {
        &self.value
    }

    fn ease(&self) -> Ease {
        self.ease
    }
}

/// Pre-sorted keys for one property with easings already resolved.
#[derive(Clone, Debug)]
pub struct PropertyCurve {
    property: AnimatedProperty,
    keys: SmallVec<[CurveKey; 4]>,
}

impl PropertyCurve {
    /// Build a curve from keyframes of a single property.
    ///
    /// Keyframes with a non-finite time are dropped. The sort is stable, so keys sharing a time
    /// keep their authored order.
    pub fn new<'a>(
        property: AnimatedProperty,
        keyframes: impl IntoIterator<Item = &'a Keyframe>,
    ) -> Option<Self> {
        let mut keys: SmallVec<[CurveKey; 4]> = keyframes
            .into_iter()
            .filter(|kf| kf.property == property && kf.time.is_finite())
            .map(|kf| CurveKey {
                time: kf.time,
                value: kf.value.clone(),
                ease: kf.ease(),
            })
            .collect();
        if keys.is_empty() {
            return None;
        }
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Some(Self { property, keys })
    }

    /// Group an animation's keyframes by property and build one curve per property.
    ///
    /// Curves come back in a stable property order.
    pub fn group(keyframes: &[Keyframe]) -> Vec<Self> {
        let mut by_prop: BTreeMap<AnimatedProperty, Vec<&Keyframe>> = BTreeMap::new();
        for kf in keyframes {
            by_prop.entry(kf.property).or_default().push(kf);
        }
        by_prop
            .into_iter()
            .filter_map(|(prop, kfs)| Self::new(prop, kfs))
            .collect()
    }

    /// Driven property.
    pub fn property(&self) -> AnimatedProperty {
        self.property
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always `false`; empty curves are never constructed.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Time of the last key.
    pub fn end_time(&self) -> f64 {
        self.keys.last().map_or(0.0, |k| k.time)
    }

    /// Resolve the curve at curve-local time `t`.
    pub fn sample(&self, t: f64) -> KeyValue {
        // Non-empty by construction.
        resolve(&self.keys, t).unwrap_or(KeyValue::Number(0.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
