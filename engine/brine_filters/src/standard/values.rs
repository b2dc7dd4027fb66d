//! Value filters.

use brine_value::Value;

use crate::filter::Filter;
use crate::registry::FilterRegistry;
use crate::signature::Slot;

pub fn register(registry: &mut FilterRegistry) {
    registry.register(default_filter());
}

/// `default` replaces empty values; emptiness is broader than falseness
/// (`""`, `[]` and `{}` are empty, `0` is not).
fn default_filter() -> Filter {
    Filter::build("default")
        .input(Slot::any())
        .required(Slot::any())
        .run(|args| {
            if args[0].is_empty() {
                args[1].clone()
            } else {
                args[0].clone()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use brine_value::ValueMap;

    fn apply(args: &[Value]) -> Value {
        let mut r = FilterRegistry::new();
        register(&mut r);
        r.apply("default", args).unwrap()
    }

    #[test]
    fn test_default_on_empty_inputs() {
        let fallback = Value::Float(2.99);
        assert_eq!(apply(&[Value::Nil, fallback.clone()]), fallback);
        assert_eq!(apply(&[Value::Bool(false), fallback.clone()]), fallback);
        assert_eq!(apply(&[Value::string(""), fallback.clone()]), fallback);
        assert_eq!(apply(&[Value::array(vec![]), fallback.clone()]), fallback);
        assert_eq!(
            apply(&[Value::map(ValueMap::new()), fallback.clone()]),
            fallback
        );
    }

    #[test]
    fn test_default_passes_non_empty() {
        assert_eq!(
            apply(&[Value::Bool(true), Value::Float(2.99)]),
            Value::Bool(true)
        );
        assert_eq!(
            apply(&[Value::string("true"), Value::Float(2.99)]),
            Value::string("true")
        );
        assert_eq!(
            apply(&[Value::Float(4.99), Value::Float(2.99)]),
            Value::Float(4.99)
        );
    }
}
