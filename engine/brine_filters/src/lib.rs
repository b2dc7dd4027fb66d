//! Brine Filters - filter registry, dispatch and standard library.
//!
//! A filter is a named operation threading a primary value through a chain:
//! `value | filter_a | filter_b: arg`. This crate owns the late-bound
//! dispatch table and the behavior of every standard filter.
//!
//! # Architecture
//!
//! - `Slot`/`SlotKind`: declared argument kinds, coerced at dispatch
//! - `Filter`: descriptor (name, arity range, slots) plus host callable
//! - `FilterRegistry`: build-once, read-many name table; no locks on the
//!   render path
//! - `standard`: the standard filter library
//!
//! # Error model
//!
//! Dispatch surfaces only structural errors (`UnknownFilter`,
//! `WrongArity`). Filters themselves never fail: bad coercions, division
//! by zero and unparseable dates resolve to `Nil` or `""`.

mod filter;
mod registry;
mod signature;

pub mod errors;
pub mod standard;

pub use errors::{FilterError, FilterResult};
pub use filter::{
    arithmetic_filter, array_filter, numeric_filter, string2_filter, string3_filter,
    string_filter, Filter, FilterBuilder, FilterFn,
};
pub use registry::FilterRegistry;
pub use signature::{Slot, SlotKind};
