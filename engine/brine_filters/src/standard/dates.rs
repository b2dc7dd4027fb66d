//! The `date` filter.

use brine_value::dates::{self, DEFAULT_DATE_FORMAT};
use brine_value::Value;
use tracing::warn;

use crate::filter::Filter;
use crate::registry::FilterRegistry;
use crate::signature::Slot;

pub fn register(registry: &mut FilterRegistry) {
    registry.register(date_filter());
}

/// Format a time, date, or parseable string. Anything that fails to parse
/// renders as the empty string so sparse date fields degrade quietly.
fn date_filter() -> Filter {
    Filter::build("date")
        .input(Slot::any())
        .optional(Slot::string())
        .run(|args| {
            let Some(instant) = dates::as_instant(&args[0]) else {
                if let Value::Str(s) = &args[0] {
                    if !s.is_empty() {
                        warn!(input = %s.as_str(), "date filter could not parse input");
                    }
                }
                return Value::string("");
            };
            let fmt = args
                .get(1)
                .and_then(Value::as_str)
                .filter(|f| !f.is_empty())
                .unwrap_or(DEFAULT_DATE_FORMAT);
            Value::string(dates::strftime(instant, fmt).unwrap_or_default())
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

    fn apply(r: &FilterRegistry, args: &[Value]) -> Value {
        r.apply("date", args).unwrap()
    }

    #[test]
    fn test_default_format() {
        let r = registry();
        assert_eq!(
            apply(&r, &[Value::string("2017-02-08 19:00:00 -05:00")]),
            Value::string("Wed, Feb 08, 17")
        );
    }

    #[test]
    fn test_explicit_formats() {
        let r = registry();
        let input = Value::string("2017-02-08 09:00:00");
        assert_eq!(
            apply(&r, &[input.clone(), Value::string("%H:%M")]),
            Value::string("09:00")
        );
        assert_eq!(
            apply(&r, &[input.clone(), Value::string("%-H:%M")]),
            Value::string("9:00")
        );
        assert_eq!(
            apply(&r, &[input, Value::string("%e/%m")]),
            Value::string(" 8/02")
        );
        assert_eq!(
            apply(
                &r,
                &[Value::string("March 14, 2016"), Value::string("%b %d, %y")]
            ),
            Value::string("Mar 14, 16")
        );
    }

    #[test]
    fn test_time_and_date_values() {
        let r = registry();
        let t = dates::parse_date_time("2015-07-17T15:04:05Z").unwrap();
        assert_eq!(apply(&r, &[Value::Time(t)]), Value::string("Fri, Jul 17, 15"));
        assert_eq!(
            apply(&r, &[Value::Date(t.date_naive())]),
            Value::string("Fri, Jul 17, 15")
        );
        assert_eq!(
            apply(&r, &[Value::Time(t), Value::string("%Y")]),
            Value::string("2015")
        );
    }

    #[test]
    fn test_unparseable_renders_empty() {
        let r = registry();
        assert_eq!(apply(&r, &[Value::Nil]), Value::string(""));
        assert_eq!(apply(&r, &[Value::string("not a date")]), Value::string(""));
        assert_eq!(apply(&r, &[Value::Int(7)]), Value::string(""));
    }
}
