use crate::animation::property::{AnimatedProperty, PropertyValue};
use crate::foundation::core::Affine;
use crate::scene::model::{Layer, LayerKind, Scene};
use std::collections::HashMap;

/// Live visual state of one mounted layer.
///
/// Starts from the authored layer fields; animations and cues overwrite it every tick. The
/// authored [`Layer`] itself is never touched.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerVisual {
    /// Layer identifier.
    pub id: String,
    /// Element type.
    pub kind: LayerKind,
    /// Z-order the layer was mounted with.
    pub order: i64,
    /// Left edge in pixels.
    pub x: f64,
    /// Top edge in pixels.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Extra horizontal scale factor.
    pub scale_x: f64,
    /// Extra vertical scale factor.
    pub scale_y: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Blur radius in pixels.
    pub blur_px: f64,
    /// Set while a cue highlight is active.
    pub highlighted: bool,
    /// Text, image or video payload, whichever the layer kind uses.
    pub content: Option<String>,
}

impl LayerVisual {
    /// Initial visual state for an authored layer.
    pub fn from_layer(layer: &Layer) -> Self {
        let content = match layer.kind {
            LayerKind::Text => layer.text_content.clone().or_else(|| layer.content.clone()),
            LayerKind::Image | LayerKind::Sprite => {
                layer.image_url.clone().or_else(|| layer.content.clone())
            }
            LayerKind::Video => layer.video_url.clone().or_else(|| layer.content.clone()),
            LayerKind::Background | LayerKind::Shape => layer
                .background_color
                .clone()
                .or_else(|| layer.content.clone()),
        };
        Self {
            id: layer.id.clone(),
            kind: layer.kind,
            order: layer.order,
            x: layer.x,
            y: layer.y,
            width: layer.width,
            height: layer.height,
            rotation_deg: layer.rotation,
            scale: layer.scale,
            scale_x: 1.0,
            scale_y: 1.0,
            opacity: layer.opacity.clamp(0.0, 1.0),
            blur_px: layer.blur.unwrap_or(0.0).max(0.0),
            highlighted: false,
            content,
        }
    }

    /// Write an encoded property value. Text values that are not numeric are ignored.
    pub fn apply(&mut self, property: AnimatedProperty, value: &PropertyValue) {
        let Some(v) = value.magnitude() else {
            tracing::trace!(layer = %self.id, ?property, "ignoring non-numeric value");
            return;
        };
        match property {
            AnimatedProperty::X => self.x = v,
            AnimatedProperty::Y => self.y = v,
            AnimatedProperty::Scale => self.scale = v,
            AnimatedProperty::ScaleX => self.scale_x = v,
            AnimatedProperty::ScaleY => self.scale_y = v,
            AnimatedProperty::Rotation => self.rotation_deg = v,
            AnimatedProperty::Opacity => self.opacity = v.clamp(0.0, 1.0),
            AnimatedProperty::Blur => self.blur_px = v.max(0.0),
            AnimatedProperty::Width => self.width = v.max(0.0),
            AnimatedProperty::Height => self.height = v.max(0.0),
        }
    }

    /// Current value of `property` in its rendering encoding.
    pub fn style(&self, property: AnimatedProperty) -> PropertyValue {
        match property {
            AnimatedProperty::X => PropertyValue::Number(self.x),
            AnimatedProperty::Y => PropertyValue::Number(self.y),
            AnimatedProperty::Scale => PropertyValue::Number(self.scale),
            AnimatedProperty::ScaleX => PropertyValue::Number(self.scale_x),
            AnimatedProperty::ScaleY => PropertyValue::Number(self.scale_y),
            AnimatedProperty::Rotation => PropertyValue::Degrees(self.rotation_deg),
            AnimatedProperty::Opacity => PropertyValue::Number(self.opacity),
            AnimatedProperty::Blur => PropertyValue::BlurRadius(self.blur_px),
            AnimatedProperty::Width => PropertyValue::Pixels(self.width),
            AnimatedProperty::Height => PropertyValue::Pixels(self.height),
        }
    }

    /// Layer-to-stage transform: translate to `(x, y)`, then rotate and scale about the
    /// layer's center.
    pub fn affine(&self) -> Affine {
        let (cx, cy) = (self.width * 0.5, self.height * 0.5);
        let t_translate = Affine::translate((self.x, self.y));
        let t_anchor = Affine::translate((cx, cy));
        let t_unanchor = Affine::translate((-cx, -cy));
        let t_rotate = Affine::rotate(self.rotation_deg.to_radians());
        let t_scale =
            Affine::scale_non_uniform(self.scale * self.scale_x, self.scale * self.scale_y);
        t_translate * t_anchor * t_rotate * t_scale * t_unanchor
    }
}

/// Lookup of a mounted layer's visual by id.
///
/// Timelines and cues write through this seam; `None` means the layer is not mounted and the
/// write is skipped.
pub trait LayerSurface {
    /// Mutable visual for `id`, if mounted.
    fn layer_mut(&mut self, id: &str) -> Option<&mut LayerVisual>;
}

/// The layered visual output of a scene, bottom to top.
#[derive(Clone, Debug, Default)]
pub struct RenderTree {
    layers: Vec<LayerVisual>,
    index: HashMap<String, usize>,
}

impl RenderTree {
    /// Mount every visible layer of `scene`, sorted by ascending `order`.
    ///
    /// The sort is stable, so equal orders keep their authored sequence.
    pub fn mount(scene: &Scene) -> Self {
        let mut mounted: Vec<&Layer> = scene.layers.iter().filter(|l| l.visible).collect();
        mounted.sort_by_key(|l| l.order);

        let mut tree = Self::default();
        for layer in mounted {
            if tree.index.contains_key(&layer.id) {
                continue;
            }
            tree.index.insert(layer.id.clone(), tree.layers.len());
            tree.layers.push(LayerVisual::from_layer(layer));
        }
        tree
    }

    /// Mounted layers, bottom to top.
    pub fn layers(&self) -> &[LayerVisual] {
        &self.layers
    }

    /// Visual for `id`, if mounted.
    pub fn get(&self, id: &str) -> Option<&LayerVisual> {
        self.index.get(id).map(|&i| &self.layers[i])
    }

    /// Number of mounted layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// `true` when nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl LayerSurface for RenderTree {
    fn layer_mut(&mut self, id: &str) -> Option<&mut LayerVisual> {
        let i = *self.index.get(id)?;
        self.layers.get_mut(i)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/tree.rs"]
mod tests;
