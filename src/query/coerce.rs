//! Literal coercion
//!
//! Order matters, because filters compare typed values:
//! strip quotes, then integer, then float, then boolean, else string.

use serde_json::{Number, Value};

const QUOTES: &[char] = &['\'', '"'];

/// Removes quote characters surrounding `text`.
pub fn strip_quotes(text: &str) -> &str {
    text.trim_start_matches(QUOTES).trim_end_matches(QUOTES)
}

/// Strips surrounding quotes from `text`, then coerces it.
pub fn coerce_quoted(text: &str) -> Value {
    coerce_literal(strip_quotes(text))
}

/// Converts an unquoted literal to its inferred JSON type.
///
/// - all ASCII digits: integer (float if it overflows 64 bits)
/// - one optional leading `-`, then digits and `.`: float
/// - `true` / `false` in any case: boolean
/// - anything else: string, unchanged
pub fn coerce_literal(text: &str) -> Value {
    if is_digits(text) {
        if let Ok(n) = text.parse::<i64>() {
            return Value::from(n);
        }
        if let Ok(n) = text.parse::<u64>() {
            return Value::from(n);
        }
    }

    if looks_like_float(text) {
        if let Some(n) = text.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(n);
        }
    }

    if text.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    Value::String(text.to_string())
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn looks_like_float(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let mut digits = unsigned.chars().filter(|c| *c != '.').peekable();
    digits.peek().is_some() && digits.all(|c| c.is_ascii_digit())
}
