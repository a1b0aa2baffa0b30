#![allow(
    clippy::result_large_err,
    reason = "EvalError is returned from every accessor; boxing it buys nothing here"
)]
//! Jinja Value - the dynamic value model of the template runtime.
//!
//! This crate provides:
//! - Runtime values (`Value`, `Heap`, `ValuesList`, `ValuesMap`)
//! - Accessor capabilities for lazily adapted data (`ListItemAccessor`,
//!   `MapItemAccessor`, `GenericList`, `GenericMap`)
//! - The reflection binder turning host Rust data into values (`Reflect`,
//!   `TypeReflection`, `reflected_type!`)
//! - Evaluation error types (`EvalError`, `EvalErrorKind`, `EvalResult`)
//!
//! # Owned vs. shared binding
//!
//! Host data is bound either by value (moved into the accessor) or through an
//! `Arc` handle, in which case the accessor reads the caller's allocation and
//! never copies it. Fields and elements reached from a shared binding are
//! bound through an `Anchor` into the same allocation, so they are not copied
//! either. A `Value` bound through a shared handle keeps that allocation alive
//! for as long as the value exists.

mod accessor;
mod errors;
mod reflect;
mod value;

pub use accessor::{
    EmptyListAccessor, GenericList, GenericMap, ListItemAccessor, MapItemAccessor,
    ValuesListAdaptor,
};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use reflect::{
    reflect, reflect_aggregate, reflect_aggregate_borrowed, reflect_aggregate_shared,
    reflect_field, Anchor, ContainerAccessor, FieldAccessor, FieldAccessors, Reflect,
    ReflectContainer, ReflectedMapAccessor, SharedRef, TypeReflection,
};
pub use value::{Heap, Value, ValuesList, ValuesMap};

// Re-export error constructors for use by other crates
pub use errors::{
    index_out_of_bounds, invalid_field, scope_depth_exceeded, type_mismatch, undefined_function,
    undefined_method, wrong_arg_count,
};
