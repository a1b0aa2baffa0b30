//! Reflection binder: host Rust data as template values.
//!
//! Binding is type-directed and resolved at compile time through the
//! [`Reflect`] impl of the host type:
//!
//! | Host type                         | Bound as                                   |
//! |-----------------------------------|--------------------------------------------|
//! | integers, `f64`, `bool`, strings  | the matching scalar `Value`                |
//! | `Vec<T>`, `VecDeque<T>`, `BTreeSet<T>` | `GenericList` over a [`ContainerAccessor`] |
//! | registered aggregate ([`TypeReflection`]) | `GenericMap` over a [`ReflectedMapAccessor`] |
//! | `Arc<T>`                          | `T`'s binding, sharing the pointee         |
//! | `Option<T>`                       | `T`'s binding, or `Empty`                  |
//!
//! Each binding has four entry points: by value (moves the data into the
//! accessor), through an `Arc` (the accessor reads the caller's allocation
//! and never copies it), through an [`Anchor`] (a borrow of a part of some
//! larger allocation, such as a field or a container element) and by
//! reference (copies).
//!
//! Fields of registered aggregates and elements of containers are always
//! bound through anchors into their parent, so walking a shared aggregate
//! never copies the nested data either.
//!
//! Aggregates register once per type with [`reflected_type!`](crate::reflected_type):
//!
//! ```text
//! #[derive(Clone)]
//! struct Image { id: i64, name: String }
//!
//! reflected_type!(Image {
//!     "id" => id,
//!     "name" => name,
//! });
//!
//! let value = reflect(Arc::new(image)); // GenericMap, no copy
//! ```

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;

use crate::accessor::{ListItemAccessor, MapItemAccessor};
use crate::errors::{index_out_of_bounds, invalid_field, EvalResult};
use crate::value::Value;

/// Borrowed view of a `T` kept alive by a shared allocation.
///
/// `get` returns `None` only when a fallible projection (an absent `Option`
/// payload, an index past the end) has nothing to point at.
pub trait SharedRef<T>: Send + Sync {
    fn get(&self) -> Option<&T>;
}

/// Shared handle to a borrowed `T`.
pub type Anchor<T> = Arc<dyn SharedRef<T>>;

impl<T: Send + Sync> SharedRef<T> for Arc<T> {
    fn get(&self) -> Option<&T> {
        Some(self)
    }
}

/// Storage for data moved into an accessor.
struct Root<T>(T);

impl<T: Send + Sync> SharedRef<T> for Root<T> {
    fn get(&self) -> Option<&T> {
        Some(&self.0)
    }
}

/// A part of the parent selected by a projection function.
struct Projection<P, F> {
    parent: Anchor<P>,
    project: fn(&P) -> Option<&F>,
}

impl<P: 'static, F: 'static> SharedRef<F> for Projection<P, F> {
    fn get(&self) -> Option<&F> {
        self.parent.get().and_then(self.project)
    }
}

/// One element of a container.
struct Element<C> {
    parent: Anchor<C>,
    index: usize,
}

impl<C: ReflectContainer> SharedRef<C::Item> for Element<C> {
    fn get(&self) -> Option<&C::Item> {
        self.parent.get()?.nth(self.index)
    }
}

fn owned_anchor<T: Send + Sync + 'static>(value: T) -> Anchor<T> {
    Arc::new(Root(value))
}

fn projection<P: 'static, F: 'static>(parent: Anchor<P>, project: fn(&P) -> Option<&F>) -> Anchor<F> {
    Arc::new(Projection { parent, project })
}

/// Binding of a host type to a [`Value`].
pub trait Reflect: Clone + Send + Sync + 'static {
    /// Bind an owned value.
    fn reflect(self) -> Value;

    /// Bind a borrowed value without copying it.
    fn reflect_borrowed(anchor: Anchor<Self>) -> Value;

    /// Bind through a shared handle without copying the pointee.
    fn reflect_shared(shared: Arc<Self>) -> Value {
        Self::reflect_borrowed(Arc::new(shared))
    }

    /// Bind a borrowed value by copying it.
    fn reflect_ref(&self) -> Value {
        self.clone().reflect()
    }
}

/// Bind any supported host value.
///
/// ```text
/// let its = reflect(vec![0_i64, 1, 2]);      // owned
/// let shared = reflect(Arc::new(images));    // shared, no copy
/// ```
#[inline]
pub fn reflect<T: Reflect>(value: T) -> Value {
    value.reflect()
}

/// Bind the part of `parent` selected by `project`, borrowing it.
///
/// Used by [`reflected_type!`](crate::reflected_type) for field access.
pub fn reflect_field<P, F>(parent: &Anchor<P>, project: fn(&P) -> Option<&F>) -> Value
where
    P: 'static,
    F: Reflect,
{
    F::reflect_borrowed(projection(Arc::clone(parent), project))
}

// Leaf types

macro_rules! reflect_copy_leaf {
    ($($ty:ty => $convert:expr),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn reflect(self) -> Value {
                    let convert: fn($ty) -> Value = $convert;
                    convert(self)
                }

                fn reflect_borrowed(anchor: Anchor<Self>) -> Value {
                    anchor.get().copied().map_or(Value::Empty, Reflect::reflect)
                }
            }
        )*
    };
}

reflect_copy_leaf!(
    i8 => |n| Value::int(i64::from(n)),
    i16 => |n| Value::int(i64::from(n)),
    i32 => |n| Value::int(i64::from(n)),
    i64 => Value::int,
    u8 => |n| Value::int(i64::from(n)),
    u16 => |n| Value::int(i64::from(n)),
    u32 => |n| Value::int(i64::from(n)),
    // Saturates at `i64::MAX`.
    usize => |n| Value::int(i64::try_from(n).unwrap_or(i64::MAX)),
    f64 => Value::Float,
    bool => Value::Bool,
    &'static str => Value::string,
);

impl Reflect for String {
    fn reflect(self) -> Value {
        Value::string(self)
    }

    fn reflect_borrowed(anchor: Anchor<Self>) -> Value {
        anchor
            .get()
            .map_or(Value::Empty, |s| Value::string(s.as_str()))
    }

    fn reflect_ref(&self) -> Value {
        Value::string(self.as_str())
    }
}

// Wrappers

impl<T: Reflect> Reflect for Arc<T> {
    fn reflect(self) -> Value {
        T::reflect_shared(self)
    }

    fn reflect_borrowed(anchor: Anchor<Self>) -> Value {
        anchor
            .get()
            .map_or(Value::Empty, |shared| T::reflect_shared(Arc::clone(shared)))
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect(self) -> Value {
        self.map_or(Value::Empty, Reflect::reflect)
    }

    fn reflect_borrowed(anchor: Anchor<Self>) -> Value {
        let present = matches!(anchor.get(), Some(Some(_)));
        if present {
            T::reflect_borrowed(projection(anchor, Option::as_ref))
        } else {
            Value::Empty
        }
    }

    fn reflect_ref(&self) -> Value {
        self.as_ref().map_or(Value::Empty, Reflect::reflect_ref)
    }
}

// Containers

/// Sequence or set whose elements reflect individually.
pub trait ReflectContainer: Send + Sync + 'static {
    type Item: Reflect;

    fn len(&self) -> usize;

    /// Element at position `index` in iteration order.
    fn nth(&self, index: usize) -> Option<&Self::Item>;
}

impl<T: Reflect> ReflectContainer for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn nth(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T: Reflect> ReflectContainer for VecDeque<T> {
    type Item = T;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn nth(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T: Reflect + Ord> ReflectContainer for BTreeSet<T> {
    type Item = T;

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn nth(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }
}

/// List accessor over a host container.
///
/// Elements are bound through anchors into the container, so nothing is
/// copied on access.
pub struct ContainerAccessor<C> {
    container: Anchor<C>,
}

impl<C: ReflectContainer> ContainerAccessor<C> {
    pub fn owned(container: C) -> Self {
        ContainerAccessor {
            container: owned_anchor(container),
        }
    }

    pub fn shared(container: Arc<C>) -> Self {
        ContainerAccessor {
            container: Arc::new(container),
        }
    }

    pub fn borrowed(container: Anchor<C>) -> Self {
        ContainerAccessor { container }
    }
}

impl<C: ReflectContainer> ListItemAccessor for ContainerAccessor<C> {
    fn size(&self) -> usize {
        self.container.get().map_or(0, ReflectContainer::len)
    }

    fn value_by_index(&self, index: usize) -> Value {
        if index >= self.size() {
            return Value::Empty;
        }
        C::Item::reflect_borrowed(Arc::new(Element {
            parent: Arc::clone(&self.container),
            index,
        }))
    }
}

macro_rules! reflect_container {
    ($($container:ident < T $(: $bound:path)? >),* $(,)?) => {
        $(
            impl<T: Reflect $(+ $bound)?> Reflect for $container<T> {
                fn reflect(self) -> Value {
                    Value::generic_list(ContainerAccessor::owned(self))
                }

                fn reflect_borrowed(anchor: Anchor<Self>) -> Value {
                    Value::generic_list(ContainerAccessor::borrowed(anchor))
                }
            }
        )*
    };
}

reflect_container!(Vec<T>, VecDeque<T>, BTreeSet<T: Ord>);

// Registered aggregates

/// Binds one field of a borrowed `T` as a value.
pub type FieldAccessor<T> = fn(&Anchor<T>) -> Value;

/// Field name to accessor table, sorted by name. Ordinal access follows this
/// order.
pub type FieldAccessors<T> = BTreeMap<&'static str, FieldAccessor<T>>;

/// Registration marker for aggregate host types.
///
/// The table is built once per type and shared, read-only, by every instance.
/// Implement through [`reflected_type!`](crate::reflected_type).
pub trait TypeReflection: Reflect {
    fn field_accessors() -> &'static FieldAccessors<Self>;
}

/// Map accessor over a registered aggregate.
pub struct ReflectedMapAccessor<T> {
    value: Anchor<T>,
}

impl<T: TypeReflection> ReflectedMapAccessor<T> {
    pub fn owned(value: T) -> Self {
        ReflectedMapAccessor {
            value: owned_anchor(value),
        }
    }

    pub fn shared(value: Arc<T>) -> Self {
        ReflectedMapAccessor {
            value: Arc::new(value),
        }
    }

    pub fn borrowed(value: Anchor<T>) -> Self {
        ReflectedMapAccessor { value }
    }

    fn field(&self, accessor: FieldAccessor<T>) -> Value {
        accessor(&self.value)
    }
}

impl<T: TypeReflection> MapItemAccessor for ReflectedMapAccessor<T> {
    fn has_value(&self, name: &str) -> bool {
        T::field_accessors().contains_key(name)
    }

    fn value_by_name(&self, name: &str) -> EvalResult {
        match T::field_accessors().get(name) {
            Some(accessor) => Ok(self.field(*accessor)),
            None => {
                tracing::debug!(field = name, "invalid field access on reflected value");
                Err(invalid_field(name))
            }
        }
    }

    fn size(&self) -> usize {
        T::field_accessors().len()
    }

    fn keys(&self) -> Vec<String> {
        T::field_accessors()
            .keys()
            .map(|name| (*name).to_string())
            .collect()
    }

    fn value_by_index(&self, index: usize) -> EvalResult {
        let accessors = T::field_accessors();
        match accessors.values().nth(index) {
            Some(accessor) => Ok(self.field(*accessor)),
            None => Err(index_out_of_bounds(index, accessors.len())),
        }
    }
}

/// Bind an owned aggregate as a `GenericMap`.
pub fn reflect_aggregate<T: TypeReflection>(value: T) -> Value {
    Value::generic_map(ReflectedMapAccessor::owned(value))
}

/// Bind a shared aggregate as a `GenericMap` without copying it.
pub fn reflect_aggregate_shared<T: TypeReflection>(value: Arc<T>) -> Value {
    Value::generic_map(ReflectedMapAccessor::shared(value))
}

/// Bind a borrowed aggregate as a `GenericMap` without copying it.
pub fn reflect_aggregate_borrowed<T: TypeReflection>(value: Anchor<T>) -> Value {
    Value::generic_map(ReflectedMapAccessor::borrowed(value))
}

/// Register an aggregate type for reflection.
///
/// Each entry maps a template-visible name to a member of the struct. The
/// member is bound in place through the parent's anchor, never copied.
/// Generates the [`TypeReflection`] table (built once, on first use) and the
/// [`Reflect`] impl binding the type as a `GenericMap`.
///
/// ```text
/// reflected_type!(Image {
///     "id" => id,
///     "name" => name,
/// });
/// ```
#[macro_export]
macro_rules! reflected_type {
    ($ty:ty { $($field:literal => $member:ident),* $(,)? }) => {
        impl $crate::TypeReflection for $ty {
            fn field_accessors() -> &'static $crate::FieldAccessors<Self> {
                static ACCESSORS: ::std::sync::OnceLock<$crate::FieldAccessors<$ty>> =
                    ::std::sync::OnceLock::new();
                ACCESSORS.get_or_init(|| {
                    let mut accessors: $crate::FieldAccessors<$ty> = ::std::collections::BTreeMap::new();
                    $(
                        let accessor: $crate::FieldAccessor<$ty> = |anchor| {
                            $crate::reflect_field(anchor, |value: &$ty| Some(&value.$member))
                        };
                        accessors.insert($field, accessor);
                    )*
                    accessors
                })
            }
        }

        impl $crate::Reflect for $ty {
            fn reflect(self) -> $crate::Value {
                $crate::reflect_aggregate(self)
            }

            fn reflect_borrowed(anchor: $crate::Anchor<Self>) -> $crate::Value {
                $crate::reflect_aggregate_borrowed(anchor)
            }
        }
    };
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
