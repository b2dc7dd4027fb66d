//! Filter descriptors and adapter constructors.
//!
//! A [`Filter`] pairs a declared signature (arity range plus a [`Slot`] per
//! position) with the host callable. The builder covers arbitrary shapes;
//! the adapter constructors below it cover the shapes the standard library
//! actually has, so most registrations stay a single expression.

use brine_value::{Number, Value};

use crate::signature::Slot;

/// Host callable behind a filter. Receives the coerced arguments, input at
/// position 0, and returns the new head value.
pub type FilterFn = Box<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// A registered filter: declared signature plus callable.
pub struct Filter {
    name: String,
    min_args: usize,
    max_args: usize,
    slots: Vec<Slot>,
    func: FilterFn,
}

impl Filter {
    /// Start declaring a filter. The input slot (position 0) defaults to
    /// `Any`; override it with [`FilterBuilder::input`].
    pub fn build(name: impl Into<String>) -> FilterBuilder {
        FilterBuilder {
            name: name.into(),
            slots: vec![Slot::any()],
            min_args: 1,
            max_args: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_args(&self) -> usize {
        self.min_args
    }

    pub fn max_args(&self) -> usize {
        self.max_args
    }

    /// Slot for position `i`. Variadic filters reuse their final slot for
    /// every surplus position.
    pub fn slot(&self, i: usize) -> Slot {
        self.slots
            .get(i)
            .or_else(|| self.slots.last())
            .copied()
            .unwrap_or(Slot::any())
    }

    /// Invoke the callable with already-coerced arguments.
    pub fn invoke(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }
}

impl std::fmt::Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filter")
            .field("name", &self.name)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Filter`].
pub struct FilterBuilder {
    name: String,
    slots: Vec<Slot>,
    min_args: usize,
    max_args: usize,
}

impl FilterBuilder {
    /// Set the input slot (position 0).
    pub fn input(mut self, slot: Slot) -> Self {
        self.slots[0] = slot;
        self
    }

    /// Add a required positional argument.
    pub fn required(mut self, slot: Slot) -> Self {
        self.slots.push(slot);
        self.min_args += 1;
        self.max_args += 1;
        self
    }

    /// Add an optional positional argument.
    pub fn optional(mut self, slot: Slot) -> Self {
        self.slots.push(slot);
        self.max_args += 1;
        self
    }

    /// Accept any number of surplus arguments, coerced with `slot`.
    pub fn variadic(mut self, slot: Slot) -> Self {
        self.slots.push(slot);
        self.max_args = usize::MAX;
        self
    }

    /// Finish with the callable.
    pub fn run(self, func: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Filter {
        Filter {
            name: self.name,
            min_args: self.min_args,
            max_args: self.max_args,
            slots: self.slots,
            func: Box::new(func),
        }
    }
}

// Adapter constructors for the common shapes

/// `fn(&str) -> String`.
pub fn string_filter(
    name: &str,
    f: impl Fn(&str) -> String + Send + Sync + 'static,
) -> Filter {
    Filter::build(name)
        .input(Slot::string())
        .run(move |args| Value::string(f(str_arg(args, 0))))
}

/// `fn(&str, &str) -> String`.
pub fn string2_filter(
    name: &str,
    f: impl Fn(&str, &str) -> String + Send + Sync + 'static,
) -> Filter {
    Filter::build(name)
        .input(Slot::string())
        .required(Slot::string())
        .run(move |args| Value::string(f(str_arg(args, 0), str_arg(args, 1))))
}

/// `fn(&str, &str, &str) -> String`.
pub fn string3_filter(
    name: &str,
    f: impl Fn(&str, &str, &str) -> String + Send + Sync + 'static,
) -> Filter {
    Filter::build(name)
        .input(Slot::string())
        .required(Slot::string())
        .required(Slot::string())
        .run(move |args| Value::string(f(str_arg(args, 0), str_arg(args, 1), str_arg(args, 2))))
}

/// Unary numeric filter. A non-numeric input reaches the callable as `None`
/// and conventionally resolves to `Nil`.
pub fn numeric_filter(
    name: &str,
    f: impl Fn(Number) -> Value + Send + Sync + 'static,
) -> Filter {
    Filter::build(name)
        .input(Slot::number())
        .run(move |args| match args[0].as_number() {
            Some(n) => f(n),
            None => Value::Nil,
        })
}

/// Binary arithmetic filter; either operand failing the numeric view makes
/// the whole application `Nil`.
pub fn arithmetic_filter(
    name: &str,
    f: impl Fn(Number, Number) -> Value + Send + Sync + 'static,
) -> Filter {
    Filter::build(name)
        .input(Slot::number())
        .required(Slot::number())
        .run(
            move |args| match (args[0].as_number(), args[1].as_number()) {
                (Some(a), Some(b)) => f(a, b),
                _ => Value::Nil,
            },
        )
}

/// `fn(&[Value]) -> Value` over the coerced input array.
pub fn array_filter(
    name: &str,
    f: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
) -> Filter {
    Filter::build(name)
        .input(Slot::array())
        .run(move |args| f(args[0].as_array().unwrap_or(&[])))
}

/// Borrow a coerced string argument.
pub(crate) fn str_arg(args: &[Value], i: usize) -> &str {
    args.get(i).and_then(Value::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_arity() {
        let f = Filter::build("slice")
            .input(Slot::string())
            .required(Slot::int())
            .optional(Slot::int())
            .run(|_| Value::Nil);
        assert_eq!(f.min_args(), 2);
        assert_eq!(f.max_args(), 3);
        assert_eq!(f.slot(1), Slot::int());
    }

    #[test]
    fn test_variadic_reuses_last_slot() {
        let f = Filter::build("concat_all")
            .required(Slot::string())
            .variadic(Slot::string())
            .run(|_| Value::Bool(false));
        assert_eq!(f.min_args(), 2);
        assert_eq!(f.max_args(), usize::MAX);
        assert_eq!(f.slot(7), Slot::string());
    }

    #[test]
    fn test_string_adapter() {
        let f = string_filter("upcase", str::to_uppercase);
        let out = f.invoke(&[Value::string("abc")]);
        assert_eq!(out, Value::string("ABC"));
    }
}
