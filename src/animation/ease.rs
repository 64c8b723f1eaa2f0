use crate::{
    animation::keyframe::{Keyframe, PropertyValue},
    animation::tokens::{map_tokens, numeric_list, unit_number},
    foundation::math::{clamp01, format_number},
};

/// Easing functions used to map normalized animation progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Identity mapping.
    #[default]
    Linear,
    /// CSS-style cubic Bézier through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
    CubicBezier {
        /// First control point x (clamped to `[0, 1]` when solving).
        x1: f64,
        /// First control point y.
        y1: f64,
        /// Second control point x (clamped to `[0, 1]` when solving).
        x2: f64,
        /// Second control point y.
        y2: f64,
    },
}

impl Easing {
    /// Build a cubic Bézier easing from CSS control points.
    pub const fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::CubicBezier { x1, y1, x2, y2 }
    }

    /// Look up a preset by name.
    ///
    /// Accepts the catalogue's camelCase names as well as the CSS keywords (`ease-in`, ...).
    /// Several presets share control points; the names do not imply distinct motion.
    pub fn named(name: &str) -> Option<Self> {
        let e = match name {
            "linear" => Self::Linear,
            "ease" => Self::cubic_bezier(0.25, 0.1, 0.25, 1.0),
            "easeIn" | "ease-in" | "easeInElastic" => Self::cubic_bezier(0.42, 0.0, 1.0, 1.0),
            "easeOut" | "ease-out" | "easeOutElastic" => Self::cubic_bezier(0.0, 0.0, 0.58, 1.0),
            "easeInOut" | "ease-in-out" | "easeInOutElastic" | "elasticIn" | "elasticOut"
            | "elasticInOut" => Self::cubic_bezier(0.42, 0.0, 0.58, 1.0),
            "backIn" | "backOut" | "backInOut" | "easeInBounce" => {
                Self::cubic_bezier(0.68, -0.55, 0.27, 1.55)
            }
            "bounceOut" => Self::cubic_bezier(0.52, -1.71, 0.16, -0.31),
            "bounceIn" | "bounceInOut" | "easeOutBounce" | "easeInOutBounce" => {
                Self::cubic_bezier(0.22, 0.61, 0.36, 1.0)
            }
            "circIn" | "circOut" | "circInOut" => Self::cubic_bezier(0.85, 0.0, 0.15, 1.0),
            "cubicIn" | "cubicOut" | "cubicInOut" | "expoIn" | "expoOut" | "expoInOut"
            | "quartIn" | "quartOut" | "quartInOut" => {
                Self::cubic_bezier(0.645, 0.045, 0.355, 1.0)
            }
            "quadIn" | "quadOut" | "quadInOut" => Self::cubic_bezier(0.455, 0.03, 0.515, 0.955),
            "quintIn" | "quintOut" | "quintInOut" => Self::cubic_bezier(0.86, 0.0, 0.07, 1.0),
            "sineIn" | "sineOut" | "sineInOut" => Self::cubic_bezier(0.445, 0.05, 0.55, 0.95),
            _ => return None,
        };
        Some(e)
    }

    /// Apply this easing to normalized progress `t` (clamped to `[0, 1]`).
    ///
    /// Endpoints are exact; curves with out-of-range `y` control points may overshoot.
    pub fn calc(self, t: f64) -> f64 {
        let t = clamp01(t);
        match self {
            Self::Linear => t,
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier_ease(t, x1, y1, x2, y2),
        }
    }

    /// Textual identifier understood by a native compositor.
    pub fn css(self) -> String {
        match self {
            Self::Linear => "linear".to_string(),
            Self::CubicBezier { x1, y1, x2, y2 } => format!(
                "cubic-bezier({},{},{},{})",
                format_number(x1),
                format_number(y1),
                format_number(x2),
                format_number(y2)
            ),
        }
    }

    /// Pre-warp a whole keyframe list instead of easing per sample.
    ///
    /// Keyframe `i` of `n` is placed at `offset = i / (n - 1)` and every numeric token it
    /// carries (literal numbers and numbers inside strings) is scaled by `calc(offset)`.
    /// Opaque strings pass through unchanged.
    pub fn frames(self, keyframes: &[Keyframe]) -> Vec<Keyframe> {
        let n = keyframes.len();
        keyframes
            .iter()
            .enumerate()
            .map(|(i, kf)| {
                let position = if n > 1 { i as f64 / (n - 1) as f64 } else { 1.0 };
                let factor = self.calc(position);
                let mut out = kf.clone();
                out.offset = Some(clamp01(position));
                for (_, value) in out.props_mut() {
                    match value {
                        PropertyValue::Number(v) => *v *= factor,
                        PropertyValue::Text(s)
                            if unit_number(s).is_some() || numeric_list(s).is_some() =>
                        {
                            *s = map_tokens(s, |_, v| v * factor)
                        }
                        PropertyValue::Text(_) => {}
                    }
                }
                out
            })
            .collect()
    }
}

/// Easing as written by users: a preset name or explicit control points.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum EasingSpec {
    /// Preset name, resolved with [`Easing::named`].
    Named(String),
    /// Explicit `[x1, y1, x2, y2]` control points.
    Bezier([f64; 4]),
}

impl EasingSpec {
    /// Resolve to a concrete curve. Unknown names fall back to linear.
    pub fn resolve(&self) -> Easing {
        match self {
            Self::Named(name) => Easing::named(name).unwrap_or_else(|| {
                tracing::warn!(easing = %name, "unknown easing name, falling back to linear");
                Easing::Linear
            }),
            Self::Bezier([x1, y1, x2, y2]) => Easing::cubic_bezier(*x1, *y1, *x2, *y2),
        }
    }
}

impl From<&str> for EasingSpec {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<Easing> for EasingSpec {
    fn from(e: Easing) -> Self {
        match e {
            Easing::Linear => Self::Named("linear".to_string()),
            Easing::CubicBezier { x1, y1, x2, y2 } => Self::Bezier([x1, y1, x2, y2]),
        }
    }
}

/// Solve `bezier_x(p) == x` (Newton-Raphson with bisection fallback) and return `bezier_y(p)`.
fn cubic_bezier_ease(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let x1 = x1.clamp(0.0, 1.0);
    let x2 = x2.clamp(0.0, 1.0);

    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2);
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..32 {
        let v = bezier_sample(p, x1, x2);
        if (v - x).abs() < 1e-7 {
            break;
        }
        if v < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }
    bezier_sample(p, y1, y2)
}

/// `B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³` in Horner form.
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
