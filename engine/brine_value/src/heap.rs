//! Enforced-`Arc` wrapper for heap-allocated value payloads.
//!
//! All heap allocations go through factory methods on `Value`; the private
//! constructor field keeps external code from building `Heap` values out of
//! raw `Arc`s.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Shared, immutable payload of a heap `Value` variant.
///
/// Cloning is an `Arc` refcount bump. Payloads are never mutated after
/// construction; filters that "modify" a value build a new one.
#[repr(transparent)]
pub struct Heap<T>(pub(crate) Arc<T>);

impl<T> Heap<T> {
    /// Allocate a new shared payload.
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }

    /// Recover the inner value if this is the only reference.
    ///
    /// Returns the `Heap` unchanged on shared payloads.
    pub fn try_into_inner(self) -> Result<T, Self> {
        Arc::try_unwrap(self.0).map_err(Heap)
    }
}

impl<T> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
