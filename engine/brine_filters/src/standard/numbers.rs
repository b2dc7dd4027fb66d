//! Numeric filters.
//!
//! All of these go through the numeric view: integers stay integers until a
//! float operand contaminates the computation, and anything non-numeric
//! resolves to `Nil` rather than erroring.

use brine_value::{Number, Value};

use crate::filter::{arithmetic_filter, numeric_filter, Filter};
use crate::registry::FilterRegistry;
use crate::signature::Slot;

pub fn register(registry: &mut FilterRegistry) {
    registry.register(numeric_filter("to_number", Number::to_value));
    registry.register(numeric_filter("abs", |n| match n {
        Number::Int(x) => Value::Int(x.abs()),
        Number::Float(f) => Value::Float(f.abs()),
    }));
    registry.register(numeric_filter("ceil", |n| {
        Value::Int(n.as_f64().ceil() as i64)
    }));
    registry.register(numeric_filter("floor", |n| {
        Value::Int(n.as_f64().floor() as i64)
    }));
    registry.register(round_filter());

    registry.register(arithmetic_filter("plus", |a, b| {
        arith(a, b, i64::checked_add, |x, y| x + y)
    }));
    registry.register(arithmetic_filter("minus", |a, b| {
        arith(a, b, i64::checked_sub, |x, y| x - y)
    }));
    registry.register(arithmetic_filter("times", |a, b| {
        arith(a, b, i64::checked_mul, |x, y| x * y)
    }));
    registry.register(arithmetic_filter("divided_by", divided_by));
    registry.register(arithmetic_filter("modulo", modulo));

    registry.register(clamp_filter("at_least", true));
    registry.register(clamp_filter("at_most", false));
}

/// Integer path with overflow falling back to floats.
fn arith(
    a: Number,
    b: Number,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Value {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => int_op(x, y)
            .map(Value::Int)
            .unwrap_or_else(|| Value::Float(float_op(x as f64, y as f64))),
        _ => Value::Float(float_op(a.as_f64(), b.as_f64())),
    }
}

/// Integer division truncates; division by zero of either flavor is `Nil`.
fn divided_by(a: Number, b: Number) -> Value {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => {
            if y == 0 {
                Value::Nil
            } else {
                Value::Int(x / y)
            }
        }
        _ => {
            let d = b.as_f64();
            if d == 0.0 {
                Value::Nil
            } else {
                Value::Float(a.as_f64() / d)
            }
        }
    }
}

fn modulo(a: Number, b: Number) -> Value {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => {
            if y == 0 {
                Value::Nil
            } else {
                Value::Int(x % y)
            }
        }
        _ => {
            let d = b.as_f64();
            if d == 0.0 {
                Value::Nil
            } else {
                Value::Float(a.as_f64() % d)
            }
        }
    }
}

/// `round` with no places snaps to an integer; with places it stays float.
fn round_filter() -> Filter {
    Filter::build("round")
        .input(Slot::number())
        .optional(Slot::int())
        .run(|args| {
            let Some(n) = args[0].as_number() else {
                return Value::Nil;
            };
            let places = match args.get(1) {
                None | Some(Value::Nil) => 0,
                Some(Value::Int(p)) => *p,
                Some(_) => 0,
            };
            if places <= 0 {
                Value::Int(n.as_f64().round() as i64)
            } else {
                let scale = 10f64.powi(places.min(i64::from(i32::MAX)) as i32);
                Value::Float((n.as_f64() * scale).round() / scale)
            }
        })
}

/// `at_least` / `at_most`.
///
/// An empty-string operand on either side short-circuits to `""` (sparse
/// CRM fields flow through untouched); otherwise both operands must view as
/// numbers, and one float operand makes the result a float even when the
/// chosen bound was an integer.
fn clamp_filter(name: &str, want_max: bool) -> Filter {
    Filter::build(name)
        .input(Slot::any())
        .required(Slot::any())
        .run(move |args| {
            if args[..2].iter().any(|v| v.as_str() == Some("")) {
                return Value::string("");
            }
            match (args[0].as_number(), args[1].as_number()) {
                (Some(a), Some(b)) => {
                    let float = a.is_float() || b.is_float();
                    let pick_a = if want_max {
                        a.as_f64() >= b.as_f64()
                    } else {
                        a.as_f64() <= b.as_f64()
                    };
                    let chosen = if pick_a { a } else { b };
                    if float {
                        Value::Float(chosen.as_f64())
                    } else {
                        chosen.to_value()
                    }
                }
                _ => Value::Nil,
            }
        })
}
