//! Name-to-filter registry and the dispatch path.
//!
//! Built once per engine during setup, read-only afterwards: dispatch takes
//! `&self` and filters sit behind `Arc`, so concurrent renders share the
//! registry without locks.

use std::sync::Arc;

use brine_value::Value;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::errors::{unknown_filter, wrong_arity, FilterResult};
use crate::filter::Filter;

/// Registry mapping filter names to descriptors.
#[derive(Default)]
pub struct FilterRegistry {
    filters: FxHashMap<String, Arc<Filter>>,
}

impl FilterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        FilterRegistry {
            filters: FxHashMap::default(),
        }
    }

    /// Install a filter. Registering a name twice replaces the previous
    /// entry (last writer wins).
    pub fn register(&mut self, filter: Filter) {
        self.filters
            .insert(filter.name().to_string(), Arc::new(filter));
    }

    /// Look up a filter by name.
    pub fn get(&self, name: &str) -> Option<&Arc<Filter>> {
        self.filters.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    /// Dispatch one filter application.
    ///
    /// `args` are the evaluated values, input at position 0. Arity is
    /// checked against the declared range, then each argument is coerced to
    /// its slot's kind and the callable invoked. Only structural problems
    /// error; the callable itself always produces a value.
    pub fn apply(&self, name: &str, args: &[Value]) -> FilterResult {
        let filter = self.get(name).ok_or_else(|| unknown_filter(name))?;
        if args.len() < filter.min_args() || args.len() > filter.max_args() {
            return Err(wrong_arity(
                name,
                args.len(),
                filter.min_args(),
                filter.max_args(),
            ));
        }
        let coerced: Vec<Value> = args
            .iter()
            .enumerate()
            .map(|(i, v)| filter.slot(i).coerce(v))
            .collect();
        trace!(filter = name, argc = coerced.len(), "dispatch");
        Ok(filter.invoke(&coerced))
    }
}

impl std::fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("len", &self.filters.len())
            .finish_non_exhaustive()
    }
}
