//! Brine Value - dynamic value model for the Brine template engine.
//!
//! This crate is the leaf of the engine: a tagged value space with the
//! coercion rules every other layer leans on.
//!
//! # Architecture
//!
//! - `Value`: the tagged enum, with `Heap`-backed payloads for cheap clones
//! - `compare`: cross-kind equality and ordering
//! - `Number`: the numeric view used by arithmetic filters
//! - `dates`: timestamp parsing and strftime formatting
//! - `serialize`: insertion-ordered JSON for `inspect`
//!
//! Values are immutable once constructed; operations that transform a value
//! build a new one.

mod heap;
mod serialize;
mod value;

pub mod compare;
pub mod dates;
pub mod number;

pub use heap::Heap;
pub use number::Number;
pub use serialize::inspect;
pub use value::{HostObject, Value, ValueMap};
