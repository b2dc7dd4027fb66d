//! Declared filter signatures and argument coercion.
//!
//! The original dynamic dispatch here would be runtime reflection over
//! function types; in Rust each filter instead declares one [`Slot`] per
//! positional argument, and the dispatcher coerces evaluated values to the
//! declared kind before invocation. A coercion that cannot succeed yields
//! `Nil` for that slot — filters defend against `Nil`, they never error.

use brine_value::Value;

/// Expected kind of one positional argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotKind {
    /// Pass the value through untouched.
    Any,
    /// View as a number (`Int`/`Float`/numeric string); otherwise `Nil`.
    Number,
    /// View as an integer; floats truncate; otherwise `Nil`.
    Int,
    /// Canonical string rendering; `Nil` renders as `""`.
    Str,
    /// Arrays pass through; maps contribute their values; `Nil` becomes the
    /// empty array; any scalar wraps as a one-element array.
    Array,
}

/// One positional argument slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub kind: SlotKind,
    /// When set, `Nil` passes through uncoerced so the filter can
    /// distinguish an absent value from a zero value.
    pub accepts_nil: bool,
}

impl Slot {
    pub const fn any() -> Self {
        Slot {
            kind: SlotKind::Any,
            accepts_nil: true,
        }
    }

    pub const fn number() -> Self {
        Slot {
            kind: SlotKind::Number,
            accepts_nil: false,
        }
    }

    pub const fn int() -> Self {
        Slot {
            kind: SlotKind::Int,
            accepts_nil: false,
        }
    }

    pub const fn string() -> Self {
        Slot {
            kind: SlotKind::Str,
            accepts_nil: false,
        }
    }

    pub const fn array() -> Self {
        Slot {
            kind: SlotKind::Array,
            accepts_nil: false,
        }
    }

    /// Coerce an evaluated argument to this slot's kind.
    pub fn coerce(&self, v: &Value) -> Value {
        if self.accepts_nil && matches!(v, Value::Nil) {
            return Value::Nil;
        }
        match self.kind {
            SlotKind::Any => v.clone(),
            SlotKind::Number => v.as_number().map_or(Value::Nil, |n| n.to_value()),
            SlotKind::Int => match v.as_number() {
                Some(brine_value::Number::Int(n)) => Value::Int(n),
                Some(brine_value::Number::Float(f)) => Value::Int(f as i64),
                None => Value::Nil,
            },
            SlotKind::Str => Value::string(v.render()),
            SlotKind::Array => match v {
                Value::Array(_) => v.clone(),
                Value::Map(m) => Value::array(m.values().cloned().collect()),
                Value::Nil => Value::array(Vec::new()),
                scalar => Value::array(vec![scalar.clone()]),
            },
        }
    }
}
