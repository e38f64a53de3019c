use serde::{Deserialize, Serialize};
use std::fmt;

/// Layer property a keyframe can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnimatedProperty {
    /// Horizontal offset.
    #[serde(rename = "x")]
    X,
    /// Vertical offset.
    #[serde(rename = "y")]
    Y,
    /// Uniform scale.
    #[serde(rename = "scale")]
    Scale,
    /// Horizontal scale.
    #[serde(rename = "scaleX")]
    ScaleX,
    /// Vertical scale.
    #[serde(rename = "scaleY")]
    ScaleY,
    /// Rotation in degrees.
    #[serde(rename = "rotation")]
    Rotation,
    /// Opacity in `[0, 1]`.
    #[serde(rename = "opacity")]
    Opacity,
    /// Blur radius in pixels.
    #[serde(rename = "blur")]
    Blur,
    /// Width in pixels.
    #[serde(rename = "width")]
    Width,
    /// Height in pixels.
    #[serde(rename = "height")]
    Height,
}

impl AnimatedProperty {
    /// Style attribute a renderer writes this property to.
    pub fn style_name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Scale => "scale",
            Self::ScaleX => "scaleX",
            Self::ScaleY => "scaleY",
            Self::Rotation => "rotation",
            Self::Opacity => "opacity",
            Self::Blur => "filter",
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

/// Authored keyframe value: a number, or a string the authoring tool stored verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    /// Numeric value.
    Number(f64),
    /// String value.
    Text(String),
}

impl KeyValue {
    /// Numeric view of the value; numeric strings parse.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }
}

impl From<f64> for KeyValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

/// A resolved property value in its rendering encoding.
///
/// The encoding depends only on the property, never on the rendering technology:
/// blur is a radius, rotation is degrees, width/height are absolute pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// Raw number (`x`, `y`, scales, opacity).
    Number(f64),
    /// Raw string that is not numeric.
    Text(String),
    /// Blur radius in pixels.
    BlurRadius(f64),
    /// Angle in degrees.
    Degrees(f64),
    /// Absolute pixel length.
    Pixels(f64),
}

impl PropertyValue {
    /// Encode a resolved keyframe value for `property`.
    pub fn encode(property: AnimatedProperty, value: &KeyValue) -> Self {
        let Some(v) = value.as_f64() else {
            return match value {
                KeyValue::Text(s) => Self::Text(s.clone()),
                KeyValue::Number(n) => Self::Number(*n),
            };
        };
        match property {
            AnimatedProperty::Blur => Self::BlurRadius(v.max(0.0)),
            AnimatedProperty::Rotation => Self::Degrees(v),
            AnimatedProperty::Width | AnimatedProperty::Height => Self::Pixels(v.max(0.0)),
            _ => Self::Number(v),
        }
    }

    /// Numeric magnitude regardless of encoding, `None` for text.
    pub fn magnitude(&self) -> Option<f64> {
        match self {
            Self::Number(v) | Self::BlurRadius(v) | Self::Degrees(v) | Self::Pixels(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::BlurRadius(v) => write!(f, "blur({v}px)"),
            Self::Degrees(v) => write!(f, "{v}deg"),
            Self::Pixels(v) => write!(f, "{v}px"),
        }
    }
}
