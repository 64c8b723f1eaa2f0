/// Decimal places kept when numbers are written back into style strings.
const FORMAT_PRECISION: f64 = 10_000.0;

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Format a number for a textual style value.
///
/// Values are rounded to four decimals so float noise (`0.30000000000000004`) never leaks into
/// generated strings, and negative zero prints as `0`.
pub(crate) fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = (v * FORMAT_PRECISION).round() / FORMAT_PRECISION;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
