//! Set-membership and formatting extras.
//!
//! These ride on top of the standard set and keep their template-facing
//! camelCase names: templates in the wild already spell them this way.

use brine_value::{compare, Value};

use crate::filter::{str_arg, Filter};
use crate::registry::FilterRegistry;
use crate::signature::Slot;

pub fn register(registry: &mut FilterRegistry) {
    registry.register(
        Filter::build("startsWith")
            .input(Slot::string())
            .required(Slot::string())
            .run(|args| Value::Bool(str_arg(args, 0).starts_with(str_arg(args, 1)))),
    );
    registry.register(
        Filter::build("endsWith")
            .input(Slot::string())
            .required(Slot::string())
            .run(|args| Value::Bool(str_arg(args, 0).ends_with(str_arg(args, 1)))),
    );
    registry.register(set_filter("setContains", false));
    registry.register(set_filter("setContainsAll", true));
    registry.register(boolean_format_filter());
}

/// Membership over a "set": either a comma-separated string or an array.
/// `all = false` asks whether any match is present, `all = true` whether
/// every match is. At least one match argument is required; without the
/// floor, `setContainsAll` with no matches would be vacuously true.
fn set_filter(name: &str, all: bool) -> Filter {
    Filter::build(name)
        .input(Slot::any())
        .required(Slot::any())
        .variadic(Slot::any())
        .run(move |args| {
            let (input, matches) = (&args[0], &args[1..]);
            let elements: Vec<Value> = match input {
                Value::Str(s) => s.split(',').map(Value::string).collect(),
                Value::Array(items) => items.to_vec(),
                _ => return Value::Bool(false),
            };
            let has = |m: &Value| elements.iter().any(|el| compare::equal(el, m));
            let result = if all {
                matches.iter().all(has)
            } else {
                matches.iter().any(has)
            };
            Value::Bool(result)
        })
}

fn boolean_format_filter() -> Filter {
    Filter::build("booleanFormat")
        .input(Slot::string())
        .required(Slot::string())
        .run(|args| {
            let s = str_arg(args, 0);
            if s.is_empty() {
                return Value::string("");
            }
            let truthy = s == "true";
            let rendered = match str_arg(args, 1) {
                "yesNo" => {
                    if truthy {
                        "Yes"
                    } else {
                        "No"
                    }
                }
                "onOff" => {
                    if truthy {
                        "On"
                    } else {
                        "Off"
                    }
                }
                _ => {
                    if truthy {
                        "True"
                    } else {
                        "False"
                    }
                }
            };
            Value::string(rendered)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> FilterRegistry {
        let mut r = FilterRegistry::new();
        register(&mut r);
        r
    }

    fn apply(r: &FilterRegistry, name: &str, args: &[Value]) -> Value {
        r.apply(name, args).unwrap()
    }

    #[test]
    fn test_starts_ends_with() {
        let r = registry();
        assert_eq!(
            apply(&r, "startsWith", &[Value::string("liquid"), Value::string("liq")]),
            Value::Bool(true)
        );
        assert_eq!(
            apply(&r, "endsWith", &[Value::string("liquid"), Value::string("uid")]),
            Value::Bool(true)
        );
        assert_eq!(
            apply(&r, "endsWith", &[Value::string("liquid"), Value::string("x")]),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_set_contains_on_string() {
        let r = registry();
        let set = Value::string("a,b,c");
        assert_eq!(
            apply(&r, "setContains", &[set.clone(), Value::string("a"), Value::string("d")]),
            Value::Bool(true)
        );
        assert_eq!(
            apply(&r, "setContainsAll", &[set.clone(), Value::string("a"), Value::string("d")]),
            Value::Bool(false)
        );
        assert_eq!(
            apply(&r, "setContainsAll", &[set, Value::string("a"), Value::string("c")]),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_set_contains_on_array() {
        let r = registry();
        let set = Value::array(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(
            apply(&r, "setContains", &[set.clone(), Value::Int(2)]),
            Value::Bool(true)
        );
        assert_eq!(
            apply(&r, "setContains", &[set, Value::Int(3)]),
            Value::Bool(false)
        );
        assert_eq!(
            apply(&r, "setContains", &[Value::Nil, Value::Int(3)]),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_set_filters_require_a_match_argument() {
        let r = registry();
        let set = Value::string("a,b,c");
        assert!(r.apply("setContains", &[set.clone()]).is_err());
        assert!(r.apply("setContainsAll", &[set]).is_err());
    }

    #[test]
    fn test_boolean_format() {
        let r = registry();
        let case = |input: &str, style: &str, expected: &str| {
            assert_eq!(
                apply(
                    &r,
                    "booleanFormat",
                    &[Value::string(input), Value::string(style)]
                ),
                Value::string(expected)
            );
        };
        case("true", "yesNo", "Yes");
        case("false", "yesNo", "No");
        case("true", "onOff", "On");
        case("true", "other", "True");
        case("false", "other", "False");
        case("", "yesNo", "");
    }
}
