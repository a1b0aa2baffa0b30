//! RAII scope guard for [`RenderContext`].
//!
//! The guard holds `&mut RenderContext` and derefs to it, so statements keep
//! using the whole context (lookups reach outer scopes) while the pushed
//! scope is guaranteed to be popped when the guard drops, including during
//! unwinding and on early `?` returns.
//!
//! ```text
//! {
//!     let mut scoped = context.scoped()?;
//!     scoped.define("item", value);
//!     render_body(body, out, &mut scoped)?;
//! } // scope popped here
//! ```

use std::ops::{Deref, DerefMut};

use jinja_value::EvalError;

use super::RenderContext;

/// Guard that pops the scope it pushed when dropped.
pub struct ScopedContext<'ctx> {
    context: &'ctx mut RenderContext,
}

impl Drop for ScopedContext<'_> {
    fn drop(&mut self) {
        self.context.exit_scope();
    }
}

impl Deref for ScopedContext<'_> {
    type Target = RenderContext;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl DerefMut for ScopedContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl RenderContext {
    /// Push a scope and return a guard that pops it on drop.
    ///
    /// Fails without pushing when the depth limit is reached.
    pub fn scoped(&mut self) -> Result<ScopedContext<'_>, EvalError> {
        self.enter_scope()?;
        Ok(ScopedContext { context: self })
    }

    /// Run `f` inside a fresh scope.
    pub fn with_scope<T, F>(&mut self, f: F) -> Result<T, EvalError>
    where
        F: FnOnce(&mut ScopedContext<'_>) -> Result<T, EvalError>,
    {
        let mut scoped = self.scoped()?;
        f(&mut scoped)
    }
}
