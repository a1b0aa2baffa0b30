//! Accessor capabilities behind the lazy `GenericList` / `GenericMap` values.
//!
//! Anything implementing [`ListItemAccessor`] or [`MapItemAccessor`] can back
//! a value without being copied into one. Accessors re-resolve on every call;
//! callers may ask for the same index repeatedly.

use std::fmt;
use std::sync::Arc;

use crate::errors::EvalResult;
use crate::value::{Heap, Value, ValuesList};

/// Sized, indexed access over list-like data.
pub trait ListItemAccessor: Send + Sync {
    /// Number of items. Assumed to terminate.
    fn size(&self) -> usize;

    /// Item at `index`, for `index < size()`. Out-of-range indices yield
    /// `Value::Empty`.
    fn value_by_index(&self, index: usize) -> Value;
}

/// Keyed and ordinal access over map-like data.
pub trait MapItemAccessor: Send + Sync {
    fn has_value(&self, name: &str) -> bool;

    /// Field `name`. Absent names are an invalid-field error.
    fn value_by_name(&self, name: &str) -> EvalResult;

    fn size(&self) -> usize;

    /// Field names, in the accessor's ordinal order.
    fn keys(&self) -> Vec<String>;

    /// Field at ordinal position `index` (the order of [`keys`](Self::keys)).
    fn value_by_index(&self, index: usize) -> EvalResult;
}

/// Lazy list value: a shared handle to a [`ListItemAccessor`].
///
/// The accessor (and any data it owns) lives as long as the last clone of
/// the value, so the reference returned by [`accessor`](Self::accessor) is
/// stable for the value's lifetime.
#[derive(Clone)]
pub struct GenericList {
    accessor: Arc<dyn ListItemAccessor>,
}

impl GenericList {
    pub fn new(accessor: impl ListItemAccessor + 'static) -> Self {
        GenericList {
            accessor: Arc::new(accessor),
        }
    }

    #[inline]
    pub fn accessor(&self) -> &dyn ListItemAccessor {
        self.accessor.as_ref()
    }

    /// Another handle to the same accessor.
    #[inline]
    pub fn shared(&self) -> Arc<dyn ListItemAccessor> {
        Arc::clone(&self.accessor)
    }

    /// Iterate the items in index order.
    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.accessor.size()).map(|i| self.accessor.value_by_index(i))
    }
}

impl fmt::Debug for GenericList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Lazy map value: a shared handle to a [`MapItemAccessor`].
#[derive(Clone)]
pub struct GenericMap {
    accessor: Arc<dyn MapItemAccessor>,
}

impl GenericMap {
    pub fn new(accessor: impl MapItemAccessor + 'static) -> Self {
        GenericMap {
            accessor: Arc::new(accessor),
        }
    }

    #[inline]
    pub fn accessor(&self) -> &dyn MapItemAccessor {
        self.accessor.as_ref()
    }

    #[inline]
    pub fn shared(&self) -> Arc<dyn MapItemAccessor> {
        Arc::clone(&self.accessor)
    }
}

impl fmt::Debug for GenericMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for key in self.accessor.keys() {
            match self.accessor.value_by_name(&key) {
                Ok(value) => map.entry(&key, &value),
                Err(err) => map.entry(&key, &err.message),
            };
        }
        map.finish()
    }
}

/// List accessor over an owned [`ValuesList`].
///
/// Holds another handle to the list's heap storage rather than a copy.
pub struct ValuesListAdaptor {
    list: Heap<ValuesList>,
}

impl ValuesListAdaptor {
    pub fn new(list: Heap<ValuesList>) -> Self {
        ValuesListAdaptor { list }
    }
}

impl ListItemAccessor for ValuesListAdaptor {
    fn size(&self) -> usize {
        self.list.len()
    }

    fn value_by_index(&self, index: usize) -> Value {
        self.list.get(index).cloned().unwrap_or(Value::Empty)
    }
}

/// Zero-length accessor for values that are not list-shaped.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyListAccessor;

impl ListItemAccessor for EmptyListAccessor {
    fn size(&self) -> usize {
        0
    }

    fn value_by_index(&self, _index: usize) -> Value {
        Value::Empty
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
