#![allow(
    clippy::result_large_err,
    reason = "EvalError comes from jinja_value and is returned by every render step"
)]
//! Jinja Eval - the statement interpreter of the template runtime.
//!
//! Rendering is a single-threaded, depth-first walk of a `jinja_ir` tree:
//! each statement evaluates its expressions against a [`RenderContext`] and
//! appends text to an [`OutStream`].
//!
//! # Architecture
//!
//! - `RenderContext`: scope stack (globals at the bottom, one scope per
//!   block statement), with `ScopedContext` as the RAII guard that pops
//! - `evaluate`: the expression evaluator the statements consume
//! - `Render`: implemented by every statement node (`for`, `if`/`elif`/`else`,
//!   `set`, text, output)
//! - `OutStream`: append-only output sink
//!
//! The tree is read-only during rendering. Concurrent renders of one tree are
//! fine as long as each has its own `RenderContext`.

mod context;
mod exec;
mod expr;
mod logging;
mod loop_names;
mod output;

// Re-export value types from jinja_value for convenience
pub use jinja_value::{EvalError, EvalErrorKind, EvalResult, Value, ValuesList, ValuesMap};

pub use context::{
    RenderContext, RenderContextBuilder, Scope, ScopedContext, DEFAULT_MAX_SCOPE_DEPTH,
};
pub use exec::{
    render_body, render_to_string, render_with_context, should_render, Render, RenderResult,
};
pub use expr::evaluate;
pub use logging::init_tracing;
pub use output::{
    buffer_output, stdout_output, BufferOutput, OutStream, SharedOutStream, StdoutOutput,
};
