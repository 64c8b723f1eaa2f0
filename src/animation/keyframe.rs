use std::{fmt, rc::Rc};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::animation::ease::EasingSpec;

/// Reserved keyframe key: normalized position in `[0, 1]`.
pub const OFFSET_KEY: &str = "offset";
/// Reserved keyframe key: per-keyframe easing.
pub const EASING_KEY: &str = "easing";
/// Reserved keyframe key: uniform scale folded into the composite transform.
pub const SCALE_KEY: &str = "scale";
/// Generated keyframe key holding the composite transform string.
pub const TRANSFORM_KEY: &str = "transform";

/// Zero-argument hook fired when playback reaches the keyframe that carries it.
pub type CompletionHook = Rc<dyn Fn()>;

/// A single style value.
///
/// Strings keep their original text so units and separators survive interpolation; the shape
/// (single number, several numbers, opaque keyword) is decided when blending.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A literal number.
    Number(f64),
    /// A textual value (`"10px"`, `"10px 20px"`, `"red"`).
    Text(String),
}

impl PropertyValue {
    /// Return the literal number, if this value is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// Return the text, if this value is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => f.write_str(&crate::foundation::math::format_number(*v)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// A named snapshot of property values.
///
/// Property order is preserved: transform fragments are composed in the order their keys
/// first appear. Reserved keys (`offset`, `easing`, `scale`) live in typed fields and never
/// appear among the plain properties.
#[derive(Clone, Default)]
pub struct Keyframe {
    props: Vec<(String, PropertyValue)>,
    /// Normalized position in `[0, 1]`.
    pub offset: Option<f64>,
    /// Easing toward the next keyframe.
    pub easing: Option<EasingSpec>,
    /// Uniform scale, composed into the transform by the motion-path builder.
    pub scale: Option<f64>,
    /// Hook fired when playback reaches this keyframe.
    pub on_complete: Option<CompletionHook>,
}

impl Keyframe {
    /// Create an empty keyframe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Keyframe::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Builder-style offset setter.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Builder-style scale setter.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Builder-style easing setter.
    pub fn with_easing(mut self, easing: EasingSpec) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Builder-style completion hook setter.
    pub fn on_complete(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_complete = Some(Rc::new(hook));
        self
    }

    /// Set a plain property, replacing an existing value in place (keeping its position).
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        let name = name.into();
        let value = value.into();
        match self.props.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.props.push((name, value)),
        }
    }

    /// Look up a plain property.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.props.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Return `true` when the plain property is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.props.iter().any(|(k, _)| k == name)
    }

    /// Remove a plain property, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        let idx = self.props.iter().position(|(k, _)| k == name)?;
        Some(self.props.remove(idx).1)
    }

    /// Iterate plain properties in insertion order.
    pub fn props(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of plain properties.
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Return `true` when no plain property is defined.
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub(crate) fn props_mut(&mut self) -> impl Iterator<Item = (&str, &mut PropertyValue)> {
        self.props.iter_mut().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Debug for Keyframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keyframe")
            .field("props", &self.props)
            .field("offset", &self.offset)
            .field("easing", &self.easing)
            .field("scale", &self.scale)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl PartialEq for Keyframe {
    fn eq(&self, other: &Self) -> bool {
        self.props == other.props
            && self.offset == other.offset
            && self.easing == other.easing
            && self.scale == other.scale
    }
}

impl Serialize for Keyframe {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(self.offset.is_some())
            + usize::from(self.easing.is_some())
            + usize::from(self.scale.is_some());
        let mut map = serializer.serialize_map(Some(self.props.len() + extra))?;
        for (k, v) in &self.props {
            map.serialize_entry(k, v)?;
        }
        if let Some(scale) = self.scale {
            map.serialize_entry(SCALE_KEY, &scale)?;
        }
        if let Some(easing) = &self.easing {
            map.serialize_entry(EASING_KEY, easing)?;
        }
        if let Some(offset) = self.offset {
            map.serialize_entry(OFFSET_KEY, &offset)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Keyframe {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyframeVisitor;

        impl<'de> Visitor<'de> for KeyframeVisitor {
            type Value = Keyframe;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a keyframe object mapping property names to numbers or strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Keyframe, A::Error> {
                let mut kf = Keyframe::new();
                while let Some(key) = access.next_key::<String>()? {
                    match key.as_str() {
                        OFFSET_KEY => kf.offset = access.next_value()?,
                        SCALE_KEY => kf.scale = access.next_value()?,
                        EASING_KEY => kf.easing = access.next_value()?,
                        _ => {
                            // `null` marks the property as undefined for this keyframe.
                            if let Some(value) = access.next_value::<Option<PropertyValue>>()? {
                                kf.set(key, value);
                            }
                        }
                    }
                }
                Ok(kf)
            }
        }

        deserializer.deserialize_map(KeyframeVisitor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframe.rs"]
mod tests;
