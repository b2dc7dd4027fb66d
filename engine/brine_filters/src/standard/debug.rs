//! Introspection filters.

use brine_value::{inspect, Value};

use crate::filter::Filter;
use crate::registry::FilterRegistry;
use crate::signature::Slot;

pub fn register(registry: &mut FilterRegistry) {
    registry.register(Filter::build("inspect").input(Slot::any()).run(|args| {
        Value::string(inspect(&args[0]))
    }));
    registry.register(Filter::build("type").input(Slot::any()).run(|args| {
        Value::string(args[0].type_name())
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> FilterRegistry {
        let mut r = FilterRegistry::new();
        register(&mut r);
        r
    }

    #[test]
    fn test_inspect_keeps_map_order() {
        let r = registry();
        let m = Value::map_from([("a", Value::Int(1))]);
        assert_eq!(
            r.apply("inspect", &[m]).unwrap(),
            Value::string(r#"{"a":1}"#)
        );
    }

    #[test]
    fn test_type() {
        let r = registry();
        assert_eq!(r.apply("type", &[Value::Int(1)]).unwrap(), Value::string("int"));
        assert_eq!(
            r.apply("type", &[Value::string("1")]).unwrap(),
            Value::string("string")
        );
        assert_eq!(r.apply("type", &[Value::Nil]).unwrap(), Value::string("nil"));
    }
}
