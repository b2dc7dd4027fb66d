//! Runtime values for template expression evaluation.
//!
//! The value space is a tagged enum over exactly the kinds a binding tree can
//! contain. Scalars are stored inline; strings, arrays and maps go through
//! [`Heap`] so that cloning a value during evaluation is a refcount bump.
//!
//! Maps preserve insertion order ([`ValueMap`] is an `IndexMap`): iteration
//! order is observable through `map`, `sort`, `uniq` and `inspect`.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate};
use indexmap::IndexMap;

use crate::compare;
use crate::heap::Heap;

/// String-keyed, insertion-ordered map payload.
pub type ValueMap = IndexMap<String, Value>;

/// A host-supplied object crossing the binding boundary.
///
/// Hosts decide how the object renders, whether it exposes properties, and
/// what it is equivalent to (a phone object may compare equal to its
/// canonical string form).
pub trait HostObject: Send + Sync {
    /// Stringification used for template output and string coercion.
    fn render(&self) -> String;

    /// Property lookup for dotted access. Objects without properties keep
    /// the default.
    fn property(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Host-defined equivalence against any other value.
    fn equals(&self, other: &Value) -> bool {
        match other {
            Value::Opaque(o) => self.render() == o.render(),
            Value::Str(s) => self.render() == **s,
            _ => false,
        }
    }
}

/// Dynamic value in the expression evaluator.
#[derive(Clone, Default)]
pub enum Value {
    /// The absent value. Distinct from the empty string.
    #[default]
    Nil,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// IEEE-754 binary64.
    Float(f64),
    /// UTF-8 text.
    Str(Heap<String>),
    /// Ordered sequence.
    Array(Heap<Vec<Value>>),
    /// Insertion-ordered string-keyed map.
    Map(Heap<ValueMap>),
    /// Calendar date, no time-of-day, no zone.
    Date(NaiveDate),
    /// Instant with zone.
    Time(DateTime<FixedOffset>),
    /// Host object with delegated rendering and property lookup.
    Opaque(Arc<dyn HostObject>),
}

// Factory methods (the only way to construct heap payloads)

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create an array value.
    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    /// Create a map value, preserving the iteration order of `entries`.
    #[inline]
    pub fn map(entries: ValueMap) -> Self {
        Value::Map(Heap::new(entries))
    }

    /// Build a map from key/value pairs in order.
    pub fn map_from<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Map(Heap::new(
            pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Wrap a host object.
    #[inline]
    pub fn opaque(obj: impl HostObject + 'static) -> Self {
        Value::Opaque(Arc::new(obj))
    }
}

// Coercion predicates

impl Value {
    /// Liquid truthiness: only `Nil` and `false` are false. Zero, the empty
    /// string and empty collections are all true.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Emptiness, the predicate behind `default` and `== empty`:
    /// `Nil`, `false`, `""`, `[]` and `{}` are empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Nil | Value::Bool(false) => true,
            Value::Str(s) => s.is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Map(m) => m.is_empty(),
            _ => false,
        }
    }

    /// Blankness: empty, or a string of nothing but ASCII whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Str(s) => s.trim_ascii().is_empty(),
            other => other.is_empty(),
        }
    }

    /// Kind name for diagnostics and the `type` filter.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::Opaque(_) => "opaque",
        }
    }
}

// Accessors

impl Value {
    /// Borrow the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the element slice, if this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the map payload, if this is a map.
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

// Rendering

impl Value {
    /// Canonical stringification: what the value looks like in template
    /// output, and what string-coercing filter slots receive.
    ///
    /// `Nil` renders as the empty string. Floats use the shortest
    /// representation that round-trips (`100.01`, not `100.010000`), and
    /// integral floats drop the point (`2`, not `2.0`). Arrays concatenate
    /// their elements' renderings.
    pub fn render(&self) -> String {
        match self {
            Value::Nil => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Str(s) => s.to_string(),
            Value::Array(items) => {
                let mut out = String::new();
                for item in items.iter() {
                    out.push_str(&item.render());
                }
                out
            }
            Value::Map(_) => crate::serialize::inspect(self),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::Time(t) => t.format("%Y-%m-%d %H:%M:%S %z").to_string(),
            Value::Opaque(o) => o.render(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Array(items) => write!(f, "Array({:?})", &**items),
            Value::Map(m) => {
                write!(f, "Map({{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k:?}: {v:?}")?;
                }
                write!(f, "}})")
            }
            Value::Date(d) => write!(f, "Date({d})"),
            Value::Time(t) => write!(f, "Time({})", t.to_rfc3339()),
            Value::Opaque(o) => write!(f, "Opaque({:?})", o.render()),
        }
    }
}

/// Equality is the template language's cross-kind equality: numbers compare
/// by value across `Int`/`Float`, times and dates compare against parseable
/// strings, opaque values use their host equivalence.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        compare::equal(self, other)
    }
}

// Conversions from host scalars

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(t: DateTime<FixedOffset>) -> Self {
        Value::Time(t)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Nil, Into::into)
    }
}
