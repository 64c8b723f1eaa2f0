use std::fmt;

use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, SeqAccess, Visitor},
};

use crate::{
    animation::ease::Easing,
    animation::keyframe::{Keyframe, PropertyValue},
    animation::transform::is_transform_key,
    foundation::error::PathglideResult,
    foundation::math::clamp01,
};

/// Keyframes as accepted at the API boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum KeyframeInput {
    /// One keyframe per entry.
    Frames(Vec<Keyframe>),
    /// Property-indexed form: each property maps to its list of values, in key order.
    Indexed(Vec<(String, Vec<PropertyValue>)>),
}

impl KeyframeInput {
    /// Parse either keyframe form from JSON text.
    pub fn from_json(text: &str) -> PathglideResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse either keyframe form from an already decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> PathglideResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

impl From<Vec<Keyframe>> for KeyframeInput {
    fn from(frames: Vec<Keyframe>) -> Self {
        Self::Frames(frames)
    }
}

/// Convert any accepted keyframe form into a per-frame list.
///
/// The indexed form is denormalized into `max(len)` frames. Transform keys map 1:1 by
/// position; other properties pick `values[⌊len · easing(i / len)⌋]`, so their values are
/// distributed along the eased timeline rather than by position.
pub fn normalize_keyframes(input: KeyframeInput, easing: Easing) -> Vec<Keyframe> {
    let indexed = match input {
        KeyframeInput::Frames(frames) => return frames,
        KeyframeInput::Indexed(indexed) => indexed,
    };

    let frame_count = indexed.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    let mut out = Vec::with_capacity(frame_count);
    for i in 0..frame_count {
        let mut frame = Keyframe::new();
        for (key, values) in &indexed {
            if values.is_empty() {
                continue;
            }
            let value = if is_transform_key(key) {
                values.get(i)
            } else {
                let len = values.len();
                let weighted = (len as f64 * clamp01(easing.calc(i as f64 / len as f64))).floor();
                values.get((weighted as usize).min(len - 1))
            };
            if let Some(v) = value {
                frame.set(key.clone(), v.clone());
            }
        }
        out.push(frame);
    }
    out
}

impl<'de> Deserialize<'de> for KeyframeInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct InputVisitor;

        impl<'de> Visitor<'de> for InputVisitor {
            type Value = KeyframeInput;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of keyframes or an object of property value lists")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<KeyframeInput, A::Error> {
                let mut frames = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(kf) = seq.next_element::<Keyframe>()? {
                    frames.push(kf);
                }
                Ok(KeyframeInput::Frames(frames))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<KeyframeInput, A::Error> {
                let mut indexed = Vec::new();
                while let Some((key, values)) = map.next_entry::<String, Vec<PropertyValue>>()? {
                    indexed.push((key, values));
                }
                Ok(KeyframeInput::Indexed(indexed))
            }
        }

        deserializer.deserialize_any(InputVisitor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/normalize.rs"]
mod tests;
