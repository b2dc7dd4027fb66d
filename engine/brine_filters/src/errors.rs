//! Structural filter errors.
//!
//! Only two things a filter chain can do wrong are worth surfacing: naming
//! a filter that does not exist, and calling one with the wrong number of
//! arguments. Everything else (bad coercion, division by zero, unparseable
//! dates) resolves to `Nil` or `""` inside the filter so a template keeps
//! rendering over sparse data.

use std::fmt;

/// Result of filter dispatch.
pub type FilterResult = Result<brine_value::Value, FilterError>;

/// Structural error from filter dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterError {
    /// No filter registered under this name.
    UnknownFilter { name: String },
    /// Argument count outside the filter's declared arity. Counts include
    /// the primary input at position 0.
    WrongArity {
        name: String,
        got: usize,
        min: usize,
        max: usize,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::UnknownFilter { name } => write!(f, "unknown filter: {name}"),
            FilterError::WrongArity {
                name,
                got,
                min,
                max,
            } => {
                if min == max {
                    write!(f, "{name} expects {min} argument(s), got {got}")
                } else if *max == usize::MAX {
                    write!(f, "{name} expects at least {min} argument(s), got {got}")
                } else {
                    write!(f, "{name} expects {min} to {max} argument(s), got {got}")
                }
            }
        }
    }
}

impl std::error::Error for FilterError {}

/// Unknown filter name.
#[cold]
pub fn unknown_filter(name: &str) -> FilterError {
    FilterError::UnknownFilter {
        name: name.to_string(),
    }
}

/// Argument count outside `[min, max]`.
#[cold]
pub fn wrong_arity(name: &str, got: usize, min: usize, max: usize) -> FilterError {
    FilterError::WrongArity {
        name: name.to_string(),
        got,
        min,
        max,
    }
}
