/// Easing functions used to map normalized segment progress.
///
/// Authored scenes name easings by string (`"ease-in-out"`, `"cubic-bezier"`, ...). Use
/// [`Ease::from_authored`] to resolve a name plus its numeric parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    /// Identity mapping.
    Linear,
    /// Quadratic ease-in.
    EaseIn,
    /// Quadratic ease-out.
    EaseOut,
    /// Quadratic ease-in/out.
    EaseInOut,
    /// Bouncing ease-out.
    Bounce,
    /// Elastic ease-out.
    Elastic,
    /// Overshooting ease-out.
    Back,
    /// CSS-style cubic Bézier through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
    CubicBezier {
        /// First control point x, clamped to `[0, 1]`.
        x1: f64,
        /// First control point y.
        y1: f64,
        /// Second control point x, clamped to `[0, 1]`.
        x2: f64,
        /// Second control point y.
        y2: f64,
    },
    /// Stepped progress with the given number of steps (`>= 1`).
    Steps(u32),
}

const BACK_OVERSHOOT: f64 = 1.701_58;

impl Ease {
    /// Resolve an authored easing identifier.
    ///
    /// Unknown identifiers and parametrized easings with unusable parameters fall back to
    /// [`Ease::Linear`].
    pub fn from_authored(name: &str, params: &[f64]) -> Self {
        match name {
            "linear" => Self::Linear,
            "ease-in" => Self::EaseIn,
            "ease-out" => Self::EaseOut,
            "ease-in-out" => Self::EaseInOut,
            "bounce" => Self::Bounce,
            "elastic" => Self::Elastic,
            "back" => Self::Back,
            "cubic-bezier" => match params {
                [x1, y1, x2, y2] if params.iter().all(|p| p.is_finite()) => Self::CubicBezier {
                    x1: x1.clamp(0.0, 1.0),
                    y1: *y1,
                    x2: x2.clamp(0.0, 1.0),
                    y2: *y2,
                },
                _ => Self::Linear,
            },
            "steps" => match params.first() {
                Some(n) if n.is_finite() && *n >= 1.0 => {
                    Self::Steps(n.floor().min(f64::from(u32::MAX)) as u32)
                }
                _ => Self::Linear,
            },
            _ => Self::Linear,
        }
    }

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::Bounce => bounce_out(t),
            Self::Elastic => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let c4 = (2.0 * std::f64::consts::PI) / 3.0;
                2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
            }
            Self::Back => {
                let c1 = BACK_OVERSHOOT;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, t),
            Self::Steps(n) => {
                if n == 0 || t >= 1.0 {
                    return t;
                }
                let n = f64::from(n);
                (t * n).floor() / n
            }
        }
    }
}

fn bounce_out(t: f64) -> f64 {
    let n1 = 7.5625;
    let d1 = 2.75;
    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984_375
    }
}

fn bezier_coord(a1: f64, a2: f64, s: f64) -> f64 {
    // B(s) for P0 = 0, P3 = 1.
    let inv = 1.0 - s;
    3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
}

fn bezier_slope(a1: f64, a2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 || x >= 1.0 {
        return x;
    }

    // Newton first, bisection when the slope is too flat to trust.
    let mut s = x;
    for _ in 0..8 {
        let err = bezier_coord(x1, x2, s) - x;
        if err.abs() < 1e-7 {
            return bezier_coord(y1, y2, s);
        }
        let d = bezier_slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= err / d;
    }

    let (mut lo, mut hi) = (0.0f64, 1.0f64);
    s = x;
    for _ in 0..64 {
        let v = bezier_coord(x1, x2, s);
        if (v - x).abs() < 1e-7 {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    bezier_coord(y1, y2, s)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
