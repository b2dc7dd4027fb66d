//! Array filters.
//!
//! Everything here takes the `Array` slot coercion: maps contribute their
//! values in insertion order, scalars arrive wrapped, `Nil` arrives empty.

use std::cmp::Ordering;

use brine_value::{compare, Value};

use crate::filter::{array_filter, str_arg, Filter};
use crate::registry::FilterRegistry;
use crate::signature::Slot;

pub fn register(registry: &mut FilterRegistry) {
    registry.register(map_filter());
    registry.register(array_filter("compact", |items| {
        Value::array(
            items
                .iter()
                .filter(|v| !matches!(v, Value::Nil))
                .cloned()
                .collect(),
        )
    }));
    registry.register(join_filter());
    registry.register(split_filter());
    registry.register(array_filter("first", |items| {
        items.first().cloned().unwrap_or(Value::Nil)
    }));
    registry.register(array_filter("last", |items| {
        items.last().cloned().unwrap_or(Value::Nil)
    }));
    registry.register(array_filter("reverse", |items| {
        Value::array(items.iter().rev().cloned().collect())
    }));
    registry.register(sort_filter("sort", false));
    registry.register(sort_filter("sort_natural", true));
    registry.register(array_filter("uniq", |items| {
        let mut seen: Vec<Value> = Vec::new();
        for item in items {
            if !seen.iter().any(|s| compare::equal(s, item)) {
                seen.push(item.clone());
            }
        }
        Value::array(seen)
    }));
    registry.register(size_filter());
}

fn map_filter() -> Filter {
    Filter::build("map")
        .input(Slot::array())
        .required(Slot::string())
        .run(|args| {
            let items = args[0].as_array().unwrap_or(&[]);
            let key = str_arg(args, 1);
            Value::array(
                items
                    .iter()
                    .map(|el| {
                        el.as_map()
                            .and_then(|m| m.get(key))
                            .cloned()
                            .unwrap_or(Value::Nil)
                    })
                    .collect(),
            )
        })
}

/// Join element renderings. `Nil` elements vanish rather than contributing
/// empty segments, so sparse `map:` output joins cleanly without `compact`.
fn join_filter() -> Filter {
    Filter::build("join")
        .input(Slot::array())
        .optional(Slot::string())
        .run(|args| {
            let items = args[0].as_array().unwrap_or(&[]);
            let sep = args.get(1).and_then(Value::as_str).unwrap_or(" ");
            let parts: Vec<String> = items
                .iter()
                .filter(|v| !matches!(v, Value::Nil))
                .map(Value::render)
                .collect();
            Value::string(parts.join(sep))
        })
}

fn split_filter() -> Filter {
    Filter::build("split")
        .input(Slot::string())
        .required(Slot::string())
        .run(|args| {
            Value::array(split_string(str_arg(args, 0), str_arg(args, 1)))
        })
}

/// Split semantics:
///
/// - a single-space separator splits on whitespace runs (awk mode), so
///   `"a \t b"` yields `["a", "b"]`;
/// - any other separator splits literally and then drops every trailing
///   empty segment (`"a//"` yields `["a"]`, `"//"` yields `[]`), while
///   interior empties survive;
/// - an empty separator splits into codepoints.
fn split_string(s: &str, sep: &str) -> Vec<Value> {
    if sep == " " {
        return s.split_whitespace().map(Value::string).collect();
    }
    let mut parts: Vec<String> = if sep.is_empty() {
        s.chars().map(String::from).collect()
    } else {
        s.split(sep).map(str::to_string).collect()
    };
    while parts.last().is_some_and(String::is_empty) {
        parts.pop();
    }
    parts.into_iter().map(Value::string).collect()
}

/// Stable sort; `Nil` sorts before everything else, optionally keyed by a
/// map property. `natural` lowercases strings before comparing.
fn sort_filter(name: &str, natural: bool) -> Filter {
    Filter::build(name)
        .input(Slot::array())
        .optional(Slot::string())
        .run(move |args| {
            let mut items: Vec<Value> = args[0].as_array().unwrap_or(&[]).to_vec();
            let key = args.get(1).and_then(Value::as_str).map(str::to_string);
            items.sort_by(|a, b| {
                let (ka, kb) = match &key {
                    Some(k) => (property_of(a, k), property_of(b, k)),
                    None => (a.clone(), b.clone()),
                };
                order(&ka, &kb, natural)
            });
            Value::array(items)
        })
}

fn property_of(v: &Value, key: &str) -> Value {
    v.as_map()
        .and_then(|m| m.get(key))
        .cloned()
        .unwrap_or(Value::Nil)
}

fn order(a: &Value, b: &Value, natural: bool) -> Ordering {
    match (matches!(a, Value::Nil), matches!(b, Value::Nil)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => {
            if natural {
                if let (Value::Str(x), Value::Str(y)) = (a, b) {
                    return x.to_lowercase().cmp(&y.to_lowercase());
                }
            }
            if compare::less(a, b) {
                Ordering::Less
            } else if compare::less(b, a) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
    }
}

fn size_filter() -> Filter {
    Filter::build("size").input(Slot::any()).run(|args| {
        let n = match &args[0] {
            Value::Str(s) => s.chars().count(),
            Value::Array(items) => items.len(),
            Value::Map(m) => m.len(),
            _ => 0,
        };
        Value::Int(n as i64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(registry: &FilterRegistry, name: &str, args: &[Value]) -> Value {
        registry.apply(name, args).unwrap()
    }

    fn registry() -> FilterRegistry {
        let mut r = FilterRegistry::new();
        register(&mut r);
        r
    }

    fn strings(items: &[&str]) -> Value {
        Value::array(items.iter().map(|s| Value::string(*s)).collect())
    }

    #[test]
    fn test_split_awk_mode() {
        let r = registry();
        let out = apply(&r, "split", &[Value::string("a \t b"), Value::string(" ")]);
        assert_eq!(out, strings(&["a", "b"]));
    }

    #[test]
    fn test_split_drops_trailing_empties() {
        let r = registry();
        let case = |s: &str, expected: &[&str]| {
            let out = apply(&r, "split", &[Value::string(s), Value::string("/")]);
            assert_eq!(out, strings(expected), "splitting {s:?}");
        };
        case("a/b/c", &["a", "b", "c"]);
        case("a/b/", &["a", "b"]);
        case("a//c", &["a", "", "c"]);
        case("a//", &["a"]);
        case("/b/", &["", "b"]);
        case("//", &[]);
        case("/", &[]);
        case("", &[]);
    }

    #[test]
    fn test_join_skips_nil_and_defaults_to_space() {
        let r = registry();
        let arr = Value::array(vec![
            Value::string("a"),
            Value::Nil,
            Value::string("b"),
        ]);
        assert_eq!(apply(&r, "join", &[arr.clone()]), Value::string("a b"));
        assert_eq!(
            apply(&r, "join", &[arr, Value::string("-")]),
            Value::string("a-b")
        );
        // A string input passes through unchanged.
        assert_eq!(
            apply(&r, "join", &[Value::string("abc")]),
            Value::string("abc")
        );
    }

    #[test]
    fn test_first_last_on_empty() {
        let r = registry();
        assert_eq!(apply(&r, "first", &[Value::array(vec![])]), Value::Nil);
        assert_eq!(apply(&r, "last", &[Value::array(vec![])]), Value::Nil);
    }

    #[test]
    fn test_reverse() {
        let r = registry();
        let out = apply(&r, "reverse", &[strings(&["a", "b", "c"])]);
        assert_eq!(out, strings(&["c", "b", "a"]));
    }

    #[test]
    fn test_sort_case_sensitive_and_natural() {
        let r = registry();
        let animals = strings(&["zebra", "octopus", "giraffe", "Sally Snake"]);
        let sorted = apply(&r, "sort", &[animals]);
        assert_eq!(sorted, strings(&["Sally Snake", "giraffe", "octopus", "zebra"]));

        let mixed = strings(&["c", "a", "B"]);
        let natural = apply(&r, "sort_natural", &[mixed]);
        assert_eq!(natural, strings(&["a", "B", "c"]));
    }

    #[test]
    fn test_sort_by_key_nil_first() {
        let r = registry();
        let items = Value::array(
            [Some(1), Some(5), Some(3), None]
                .iter()
                .map(|w| {
                    Value::map_from([(
                        "weight",
                        w.map_or(Value::Nil, Value::Int),
                    )])
                })
                .collect(),
        );
        let sorted = apply(&r, "sort", &[items, Value::string("weight")]);
        let weights: Vec<Value> = sorted
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m.as_map().unwrap().get("weight").cloned().unwrap())
            .collect();
        assert_eq!(
            weights,
            vec![Value::Nil, Value::Int(1), Value::Int(3), Value::Int(5)]
        );
    }

    #[test]
    fn test_uniq_preserves_first_occurrence() {
        let r = registry();
        let out = apply(&r, "uniq", &[strings(&["one", "two", "one", "three"])]);
        assert_eq!(out, strings(&["one", "two", "three"]));
    }

    #[test]
    fn test_map_and_compact() {
        let r = registry();
        let pages = Value::array(vec![
            Value::map_from([("category", Value::string("business"))]),
            Value::map_from([("name", Value::string("page 3"))]),
            Value::map_from([("category", Value::string("sports"))]),
        ]);
        let mapped = apply(&r, "map", &[pages, Value::string("category")]);
        assert_eq!(
            mapped,
            Value::array(vec![
                Value::string("business"),
                Value::Nil,
                Value::string("sports")
            ])
        );
        let compacted = apply(&r, "compact", &[mapped]);
        assert_eq!(compacted.as_array().map(<[Value]>::len), Some(2));
    }

    #[test]
    fn test_size() {
        let r = registry();
        assert_eq!(
            apply(&r, "size", &[Value::string("Ground control to Major Tom.")]),
            Value::Int(28)
        );
        assert_eq!(apply(&r, "size", &[Value::string("Привет")]), Value::Int(6));
        assert_eq!(apply(&r, "size", &[Value::Nil]), Value::Int(0));
        assert_eq!(
            apply(&r, "size", &[strings(&["a", "b"])]),
            Value::Int(2)
        );
    }

    #[test]
    fn test_map_input_treated_as_values() {
        let r = registry();
        let m = Value::map_from([("1", Value::string("b")), ("2", Value::string("a"))]);
        assert_eq!(apply(&r, "first", &[m.clone()]), Value::string("b"));
        assert_eq!(apply(&r, "last", &[m.clone()]), Value::string("a"));
        assert_eq!(apply(&r, "join", &[m]), Value::string("b a"));
    }
}
