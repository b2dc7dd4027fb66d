//! Cross-kind equality and ordering.
//!
//! All comparison semantics live here; the evaluator's comparison operators
//! and every filter that compares values (`sort`, `uniq`, `contains`) call
//! into this module rather than re-deriving the rules.

use crate::dates;
use crate::value::Value;

/// Template-language equality.
///
/// `Nil` equals only `Nil`. Numbers compare by value across `Int`/`Float`.
/// Strings compare by bytes; numeric strings do NOT compare equal to
/// numbers. Arrays compare elementwise, maps by unordered key/value pairs.
/// A `Time` or `Date` on one side parses a string on the other side before
/// comparing. Opaque values use their host-defined equivalence.
pub fn equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Nil, _) | (_, Value::Nil) => false,

        (Value::Bool(x), Value::Bool(y)) => x == y,

        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Int(x), Value::Float(y)) | (Value::Float(y), Value::Int(x)) => *x as f64 == *y,

        (Value::Str(x), Value::Str(y)) => x == y,

        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(u, v)| equal(u, v))
        }
        (Value::Map(x), Value::Map(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|other| equal(v, other)))
        }

        (Value::Time(x), Value::Time(y)) => x == y,
        (Value::Time(t), Value::Str(s)) | (Value::Str(s), Value::Time(t)) => {
            dates::parse_date_time(s).is_some_and(|parsed| *t == parsed)
        }

        (Value::Date(x), Value::Date(y)) => x == y,
        (Value::Date(d), Value::Str(s)) | (Value::Str(s), Value::Date(d)) => {
            dates::parse_date(s).is_some_and(|parsed| *d == parsed)
        }
        (Value::Date(d), Value::Time(t)) | (Value::Time(t), Value::Date(d)) => {
            dates::midnight(*d) == *t
        }

        (Value::Opaque(o), other) | (other, Value::Opaque(o)) => o.equals(other),

        _ => false,
    }
}

/// Template-language ordering: `a < b`.
///
/// Defined for like-kinded numerics, strings, booleans (`false < true`),
/// and times/dates (with string parsing on the other side). Against `Nil`
/// the concrete side compares with its kind's zero. Anything else is not
/// less.
pub fn less(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Nil, Value::Nil) => false,
        (Value::Nil, other) => zero_less_than(other),
        (other, Value::Nil) => less_than_zero(other),

        (Value::Bool(x), Value::Bool(y)) => !*x && *y,

        (Value::Int(x), Value::Int(y)) => x < y,
        (Value::Float(x), Value::Float(y)) => x < y,
        (Value::Int(x), Value::Float(y)) => (*x as f64) < *y,
        (Value::Float(x), Value::Int(y)) => *x < (*y as f64),

        (Value::Str(x), Value::Str(y)) => **x < **y,

        (Value::Time(x), Value::Time(y)) => x < y,
        (Value::Time(t), Value::Str(s)) => {
            dates::parse_date_time(s).is_some_and(|parsed| *t < parsed)
        }
        (Value::Str(s), Value::Time(t)) => {
            dates::parse_date_time(s).is_some_and(|parsed| parsed < *t)
        }

        (Value::Date(x), Value::Date(y)) => x < y,
        (Value::Date(d), Value::Str(s)) => dates::parse_date(s).is_some_and(|parsed| *d < parsed),
        (Value::Str(s), Value::Date(d)) => dates::parse_date(s).is_some_and(|parsed| parsed < *d),

        _ => false,
    }
}

/// `nil < x`: the kind's zero compared against `x`.
fn zero_less_than(v: &Value) -> bool {
    match v {
        Value::Str(s) => !s.is_empty(),
        Value::Int(n) => 0 < *n,
        Value::Float(f) => 0.0 < *f,
        _ => false,
    }
}

/// `x < nil`: `x` compared against its kind's zero.
fn less_than_zero(v: &Value) -> bool {
    match v {
        // No string sorts below the empty string.
        Value::Str(_) => false,
        Value::Int(n) => *n < 0,
        Value::Float(f) => *f < 0.0,
        _ => false,
    }
}
