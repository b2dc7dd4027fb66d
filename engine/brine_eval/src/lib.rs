//! Brine Eval - expression evaluation for the Brine template engine.
//!
//! This crate ties the engine together: the binding context, the
//! tree-walking evaluator, and the [`Engine`] facade the outer template
//! machinery calls.
//!
//! # Re-exports
//!
//! The value model and filter types are re-exported so embedders depend on
//! one crate:
//! - `Value`, `ValueMap`, `HostObject` from `brine_value`
//! - `Filter`, `FilterRegistry`, `Slot` from `brine_filters`
//! - `Expr`, `ParseError`, `parse` from `brine_expr`

mod context;
mod engine;
mod errors;
mod evaluator;

pub use context::{Bindings, Context};
pub use engine::Engine;
pub use errors::{Error, EvalError};
pub use evaluator::Evaluator;

pub use brine_expr::{parse, Expr, ParseError};
pub use brine_filters::{Filter, FilterRegistry, Slot, SlotKind};
pub use brine_value::{HostObject, Value, ValueMap};
