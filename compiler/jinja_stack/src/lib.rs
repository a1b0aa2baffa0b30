//! Stack growth for recursive rendering.
//!
//! Statement bodies nest arbitrarily deep (`for` inside `if` inside `for` ...)
//! and the interpreter renders them by plain recursion. Every statement render
//! goes through [`ensure_sufficient_stack`] so a deeply nested tree grows the
//! stack instead of overflowing it.
//!
//! - **Native targets**: `stacker::maybe_grow`.
//! - **WASM targets**: passthrough.

/// Remaining stack below which we grow (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn render_stmt(stmt: &Stmt, ctx: &mut RenderContext) -> Result<(), EvalError> {
///     ensure_sufficient_stack(|| match stmt { ... })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
