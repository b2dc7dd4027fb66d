//! Engine facade: the four operations the surrounding template machinery
//! uses.
//!
//! An engine owns its filter registry. Registration happens during setup
//! (`&mut self`); everything on the render path takes `&self`, so one
//! engine serves concurrent renders without locks.

use brine_expr::{parse, Expr, ParseError};
use brine_filters::{standard, Filter, FilterRegistry};
use brine_value::Value;
use tracing::debug;

use crate::context::Context;
use crate::errors::{Error, EvalError};
use crate::evaluator::Evaluator;

/// Expression engine: registry plus evaluator entry points.
pub struct Engine {
    registry: FilterRegistry,
}

impl Engine {
    /// Engine with the standard filter library installed.
    pub fn new() -> Self {
        let mut registry = FilterRegistry::new();
        standard::register(&mut registry);
        debug!(filters = registry.len(), "engine ready");
        Engine { registry }
    }

    /// Engine with no filters; chains will fail with `UnknownFilter` until
    /// the host registers its own.
    pub fn bare() -> Self {
        Engine {
            registry: FilterRegistry::new(),
        }
    }

    /// Install a filter. Re-registering a name replaces the previous
    /// filter, so hosts can override standard behavior.
    pub fn register_filter(&mut self, filter: Filter) {
        self.registry.register(filter);
    }

    /// The engine's registry.
    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    /// Parse expression or filter-chain source.
    pub fn parse(&self, source: &str) -> Result<Expr, ParseError> {
        parse(source)
    }

    /// Evaluate a parsed expression over a context.
    pub fn evaluate(&self, expr: &Expr, ctx: &Context) -> Result<Value, EvalError> {
        Evaluator::new(&self.registry).evaluate(expr, ctx)
    }

    /// Parse and evaluate in one step.
    pub fn evaluate_string(&self, source: &str, ctx: &Context) -> Result<Value, Error> {
        let expr = self.parse(source)?;
        Ok(self.evaluate(&expr, ctx)?)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
