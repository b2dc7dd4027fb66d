//! Numeric view over values.
//!
//! Arithmetic filters do not operate on `Value` directly; they first ask for
//! a [`Number`] view. `Int`, `Float`, and strings that spell a plain integer
//! or decimal literal (optional sign, digits, optional fraction, no
//! exponent) all have one. Everything else does not, and the requesting
//! filter resolves to `Nil`.
//!
//! Int-ness survives the view: `"20"` views as `Int(20)`, so `20 | plus:
//! "20"` stays an integer, while one float operand contaminates the result.

use crate::value::Value;

/// A value viewed as a number, preserving int-vs-float-ness.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Widen to `f64`.
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    /// Whether this view came from a float (or float-spelling string).
    #[inline]
    pub fn is_float(self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Convert back into a value.
    #[inline]
    pub fn to_value(self) -> Value {
        match self {
            Number::Int(n) => Value::Int(n),
            Number::Float(f) => Value::Float(f),
        }
    }

    /// Combine two views arithmetically: the result is a float if either
    /// side is, an integer otherwise.
    pub fn promote(a: Number, b: Number) -> (bool, f64, f64) {
        (a.is_float() || b.is_float(), a.as_f64(), b.as_f64())
    }
}

impl Value {
    /// View this value as a number, if it has a numeric view.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int(n) => Some(Number::Int(*n)),
            Value::Float(f) => Some(Number::Float(*f)),
            Value::Str(s) => parse_numeric(s),
            _ => None,
        }
    }
}

/// Parse a numeric literal: `[+-]? digits ('.' digits)?`.
///
/// Deliberately stricter than `str::parse::<f64>`: no exponents, no `inf`
/// or `nan`, no leading dot. Surrounding ASCII whitespace is tolerated
/// because binding data frequently carries it.
pub fn parse_numeric(s: &str) -> Option<Number> {
    let t = s.trim_ascii();
    if t.is_empty() {
        return None;
    }
    let digits = t.strip_prefix(['+', '-']).unwrap_or(t);
    let (int_part, frac) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match frac {
        None => t.parse::<i64>().ok().map(Number::Int),
        Some(f) => {
            if f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            t.parse::<f64>().ok().map(Number::Float)
        }
    }
}
