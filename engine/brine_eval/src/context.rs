//! Binding context: the name-resolution seam between the surrounding
//! template engine and the evaluator.
//!
//! The outer engine owns root bindings and pushes frames around control-flow
//! blocks (for-loop variables, captures); the evaluator only ever asks
//! "what is `name` right now". Lookup scans frames innermost-first, then
//! falls back to the root.

use brine_value::{Value, ValueMap};

/// Pluggable root-binding lookup.
///
/// Implemented for plain maps and for closures, so callers can hand the
/// evaluator either a materialized binding tree or a live lookup into their
/// own data model.
pub trait Bindings: Send + Sync {
    fn lookup(&self, name: &str) -> Option<Value>;
}

impl Bindings for ValueMap {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl<F> Bindings for F
where
    F: Fn(&str) -> Option<Value> + Send + Sync,
{
    fn lookup(&self, name: &str) -> Option<Value> {
        self(name)
    }
}

/// A scope chain: root bindings plus zero or more frames.
pub struct Context {
    root: Box<dyn Bindings>,
    frames: Vec<ValueMap>,
}

impl Context {
    /// Create a context over root bindings.
    pub fn new(root: impl Bindings + 'static) -> Self {
        Context {
            root: Box::new(root),
            frames: Vec::new(),
        }
    }

    /// Create an empty context (every lookup misses).
    pub fn empty() -> Self {
        Context::new(ValueMap::new())
    }

    /// Push a frame. Names in the frame shadow outer frames and the root.
    pub fn push(&mut self, frame: ValueMap) {
        self.frames.push(frame);
    }

    /// Pop the innermost frame. Popping with no frames is a no-op; the
    /// root is not a frame.
    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Current frame depth.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Resolve a name; misses are `Nil`, never an error.
    pub fn lookup(&self, name: &str) -> Value {
        for frame in self.frames.iter().rev() {
            if let Some(v) = frame.get(name) {
                return v.clone();
            }
        }
        self.root.lookup(name).unwrap_or(Value::Nil)
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("frames", &self.frames.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(pairs: &[(&str, i64)]) -> ValueMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), Value::Int(*v)))
            .collect()
    }

    #[test]
    fn test_root_lookup() {
        let ctx = Context::new(frame(&[("x", 1)]));
        assert_eq!(ctx.lookup("x"), Value::Int(1));
        assert_eq!(ctx.lookup("missing"), Value::Nil);
    }

    #[test]
    fn test_frames_shadow_root() {
        let mut ctx = Context::new(frame(&[("x", 1)]));
        ctx.push(frame(&[("x", 2)]));
        assert_eq!(ctx.lookup("x"), Value::Int(2));
        ctx.push(frame(&[("x", 3)]));
        assert_eq!(ctx.lookup("x"), Value::Int(3));
        ctx.pop();
        assert_eq!(ctx.lookup("x"), Value::Int(2));
        ctx.pop();
        assert_eq!(ctx.lookup("x"), Value::Int(1));
    }

    #[test]
    fn test_closure_bindings() {
        let ctx = Context::new(|name: &str| {
            (name == "answer").then_some(Value::Int(42))
        });
        assert_eq!(ctx.lookup("answer"), Value::Int(42));
        assert_eq!(ctx.lookup("question"), Value::Nil);
    }

    #[test]
    fn test_pop_without_frames_is_noop() {
        let mut ctx = Context::empty();
        ctx.pop();
        assert_eq!(ctx.depth(), 0);
    }
}
