//! Transform-like style keys and their textual function-call form.

use crate::animation::keyframe::SCALE_KEY;

const TRANSFORM_KEYS: &[&str] = &[
    "x",
    "y",
    "translate",
    "translateX",
    "translateY",
    "translateZ",
    "translate3d",
    "scaleX",
    "scaleY",
    "scaleZ",
    "scale3d",
    "rotate",
    "rotateX",
    "rotateY",
    "rotateZ",
    "rotate3d",
    "skew",
    "skewX",
    "skewY",
    "skewZ",
    "skew3d",
];

/// Return `true` for keys that compose into the `transform` string.
///
/// Bare `scale` is reserved for the motion-path builder and is not a transform key here.
pub fn is_transform_key(key: &str) -> bool {
    key != SCALE_KEY && TRANSFORM_KEYS.contains(&key)
}

/// Unit appended to bare numbers for a transform key.
pub(crate) fn default_unit(key: &str) -> &'static str {
    if key == "x" || key == "y" || key.starts_with("translate") {
        "px"
    } else if key.starts_with("rotate") || key.starts_with("skew") {
        "deg"
    } else {
        ""
    }
}

/// Attach the key's default unit to every bare numeric token of `value`.
///
/// Tokens already followed by a unit (`10px`, `45deg`, `50%`) are left as they are.
pub(crate) fn with_units(key: &str, value: &str) -> String {
    let unit = default_unit(key);
    if unit.is_empty() {
        return value.to_string();
    }
    let parts: Vec<String> = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(|p| {
            if p.parse::<f64>().is_ok() {
                format!("{p}{unit}")
            } else {
                p.to_string()
            }
        })
        .collect();
    let sep = if value.contains(',') { ", " } else { " " };
    parts.join(sep)
}

/// Build the function-call form of a transform key: `x` → `translateX(..)`, others `key(..)`.
pub(crate) fn build_transform(key: &str, value: &str) -> String {
    let value = with_units(key, value);
    match key {
        "x" => format!("translateX({value})"),
        "y" => format!("translateY({value})"),
        _ => format!("{key}({value})"),
    }
}
