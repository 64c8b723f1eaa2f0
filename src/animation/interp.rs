use crate::{
    animation::keyframe::PropertyValue,
    animation::tokens::{Tokens, map_tokens, numeric_list, numeric_tokens, unit_number},
    animation::transform::{build_transform, is_transform_key},
    foundation::math::lerp,
};

/// Result of blending one property at one sample.
#[derive(Clone, Debug, PartialEq)]
pub enum Interpolated {
    /// A plain style value to install under the property's own name.
    Value(PropertyValue),
    /// A transform function call (`translateX(12px)`) to append to the composite transform.
    Transform(String),
}

/// Shape of a value as seen by the interpolator.
#[derive(Debug)]
enum Shape<'a> {
    Number(f64),
    Single(&'a str, f64),
    Multi(&'a str, Tokens),
    Opaque,
}

fn shape(v: &PropertyValue) -> Shape<'_> {
    match v {
        PropertyValue::Number(n) => Shape::Number(*n),
        PropertyValue::Text(s) => {
            if let Some(n) = unit_number(s) {
                return Shape::Single(s, n);
            }
            match numeric_list(s) {
                Some(tokens) if tokens.len() >= 2 => Shape::Multi(s, tokens),
                _ => Shape::Opaque,
            }
        }
    }
}

/// Blend property `name` from `from` (the defining keyframe at or before the sample) toward
/// `to` (the next defining keyframe) at local progress `t`.
///
/// Returns `None` only when neither side defines the property. Never fails: shapes that cannot
/// be blended hold the source value, and a missing source adopts the destination verbatim.
pub fn interpolate(
    name: &str,
    from: Option<&PropertyValue>,
    to: Option<&PropertyValue>,
    t: f64,
) -> Option<Interpolated> {
    if is_transform_key(name) {
        let text = match (from, to) {
            (Some(a), Some(b)) => blend_tokens(&a.to_string(), &numeric_tokens(&b.to_string()), t),
            (Some(v), None) | (None, Some(v)) => v.to_string(),
            (None, None) => return None,
        };
        return Some(Interpolated::Transform(build_transform(name, &text)));
    }

    let (a, b) = match (from, to) {
        (Some(a), Some(b)) => (a, b),
        (Some(v), None) | (None, Some(v)) => return Some(Interpolated::Value(v.clone())),
        (None, None) => return None,
    };

    let value = match (shape(a), shape(b)) {
        (Shape::Multi(text, _), Shape::Multi(_, to_tokens)) => {
            PropertyValue::Text(blend_tokens(text, &to_tokens, t))
        }
        (Shape::Number(x), Shape::Number(y) | Shape::Single(_, y)) => {
            PropertyValue::Number(lerp(x, y, t))
        }
        (Shape::Single(text, _), Shape::Number(y) | Shape::Single(_, y)) => {
            PropertyValue::Text(map_tokens(text, |_, x| lerp(x, y, t)))
        }
        (Shape::Opaque, Shape::Opaque) => a.clone(),
        (sa, sb) => {
            tracing::debug!(
                property = name,
                from = ?sa,
                to = ?sb,
                "mismatched value shapes, holding source"
            );
            a.clone()
        }
    };
    Some(Interpolated::Value(value))
}

/// Blend the numeric tokens of `template` toward `to`, keeping units and separators.
///
/// Missing destination tokens are padded from the source side.
fn blend_tokens(template: &str, to: &[f64], t: f64) -> String {
    map_tokens(template, |i, from| {
        let target = to.get(i).copied().unwrap_or(from);
        lerp(from, target, t)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
