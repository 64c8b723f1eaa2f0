use std::sync::OnceLock;

use regex::{Captures, Regex};
use smallvec::SmallVec;

use crate::foundation::math::format_number;

/// Numeric tokens of a typical style value (`"10px 20px"`, `"rgba(0, 0, 0, 0.5)"`).
pub(crate) type Tokens = SmallVec<[f64; 4]>;

fn number_re() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| {
        Regex::new(r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").expect("numeric token pattern")
    })
}

fn unit_number_re() -> &'static Regex {
    static UNIT_NUMBER: OnceLock<Regex> = OnceLock::new();
    UNIT_NUMBER.get_or_init(|| {
        Regex::new(r"^([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)(?:[a-zA-Z]+|%)?$")
            .expect("unit number pattern")
    })
}

/// Value of a lone number with an optional unit (`"0.5"`, `"10px"`, `"45deg"`, `"50%"`).
pub(crate) fn unit_number(s: &str) -> Option<f64> {
    let caps = unit_number_re().captures(s.trim())?;
    caps[1].parse().ok()
}

/// Tokens of a value made only of unit numbers, separators and function names
/// (`"10px 20px"`, `"10,20"`, `"rgb(255, 0, 0)"`).
///
/// Returns `None` as soon as any word is something else, so `"#112233"` or `"auto 10px"`
/// are not numeric.
pub(crate) fn numeric_list(s: &str) -> Option<Tokens> {
    let mut tokens = Tokens::new();
    for word in s.split(|c: char| c.is_whitespace() || matches!(c, ',' | '/' | ')')) {
        let arg = match word.split_once('(') {
            Some((func, arg)) => {
                if !func.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
                    return None;
                }
                arg
            }
            None => word,
        };
        if !arg.is_empty() {
            tokens.push(unit_number(arg)?);
        }
    }
    (!tokens.is_empty()).then_some(tokens)
}

/// Parse every numeric token in `s`, in order.
pub(crate) fn numeric_tokens(s: &str) -> Tokens {
    number_re()
        .find_iter(s)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/// Rewrite every numeric token in `template`, keeping all surrounding text.
///
/// `f` receives the token's index and parsed value and returns the replacement value.
pub(crate) fn map_tokens(template: &str, mut f: impl FnMut(usize, f64) -> f64) -> String {
    let mut idx = 0usize;
    number_re()
        .replace_all(template, |caps: &Captures<'_>| {
            let raw = &caps[0];
            let out = match raw.parse::<f64>() {
                Ok(v) => format_number(f(idx, v)),
                Err(_) => raw.to_string(),
            };
            idx += 1;
            out
        })
        .into_owned()
}
