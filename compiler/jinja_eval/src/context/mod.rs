//! Render context: the scope stack of one render pass.
//!
//! The bottom scope holds the render parameters and is never popped. Block
//! statements push a scope on entry and pop it on exit, strictly nested;
//! use [`RenderContext::scoped`] so the pop happens on every exit path.
//!
//! Lookups search from the innermost scope outwards. Definitions always go
//! into the innermost scope, so an inner binding shadows an outer one of the
//! same name instead of overwriting it.

mod scope_guard;

use std::iter;

use jinja_value::{scope_depth_exceeded, EvalError, Value, ValuesMap};

pub use scope_guard::ScopedContext;

/// Default limit on nested scopes, the globals scope included.
pub const DEFAULT_MAX_SCOPE_DEPTH: usize = 256;

/// A single scope: name to value bindings.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: ValuesMap,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    /// Bind `name` in this scope, replacing any previous binding.
    #[inline]
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.bindings.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl From<ValuesMap> for Scope {
    fn from(bindings: ValuesMap) -> Self {
        Scope { bindings }
    }
}

/// Scope stack for one render.
///
/// Not shared between renders: each concurrent render of a tree owns its
/// own context.
#[derive(Debug)]
pub struct RenderContext {
    /// Render parameters (always at the bottom).
    global: Scope,
    /// Scopes pushed by block statements, innermost last.
    scopes: Vec<Scope>,
    max_depth: usize,
}

impl RenderContext {
    /// Create a context whose globals scope holds `params`.
    pub fn new(params: ValuesMap) -> Self {
        RenderContext {
            global: Scope::from(params),
            scopes: Vec::new(),
            max_depth: DEFAULT_MAX_SCOPE_DEPTH,
        }
    }

    pub fn builder() -> RenderContextBuilder {
        RenderContextBuilder::default()
    }

    /// Number of scopes, the globals scope included.
    pub fn depth(&self) -> usize {
        self.scopes.len() + 1
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Push a new empty scope and return it.
    ///
    /// Fails when the stack is already at the configured maximum depth.
    pub fn enter_scope(&mut self) -> Result<&mut Scope, EvalError> {
        if self.depth() >= self.max_depth {
            tracing::debug!(limit = self.max_depth, "scope depth limit reached");
            return Err(scope_depth_exceeded(self.max_depth));
        }
        self.scopes.push(Scope::new());
        tracing::debug!(depth = self.depth(), "enter scope");
        Ok(self.current_scope_mut())
    }

    /// Pop the innermost scope. The globals scope is never popped.
    pub fn exit_scope(&mut self) {
        if self.scopes.pop().is_some() {
            tracing::debug!(depth = self.depth(), "exit scope");
        }
    }

    #[inline]
    pub fn current_scope(&self) -> &Scope {
        self.scopes.last().unwrap_or(&self.global)
    }

    #[inline]
    pub fn current_scope_mut(&mut self) -> &mut Scope {
        self.scopes.last_mut().unwrap_or(&mut self.global)
    }

    pub fn global_scope(&self) -> &Scope {
        &self.global
    }

    /// Bind `name` in the innermost scope.
    #[inline]
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.current_scope_mut().define(name, value);
    }

    /// Look `name` up from the innermost scope outwards.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.scopes
            .iter()
            .rev()
            .chain(iter::once(&self.global))
            .find_map(|scope| scope.get(name))
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        RenderContext::new(ValuesMap::default())
    }
}

/// Builder for [`RenderContext`].
#[derive(Debug, Default)]
pub struct RenderContextBuilder {
    globals: ValuesMap,
    max_scope_depth: Option<usize>,
}

impl RenderContextBuilder {
    /// Add all of `globals` to the render parameters.
    #[must_use]
    pub fn globals(mut self, globals: ValuesMap) -> Self {
        self.globals.extend(globals);
        self
    }

    /// Add one render parameter.
    #[must_use]
    pub fn global(mut self, name: impl Into<String>, value: Value) -> Self {
        self.globals.insert(name.into(), value);
        self
    }

    /// Limit nested scopes (globals scope included). Clamped to at least 1.
    #[must_use]
    pub fn max_scope_depth(mut self, depth: usize) -> Self {
        self.max_scope_depth = Some(depth.max(1));
        self
    }

    pub fn build(self) -> RenderContext {
        let mut context = RenderContext::new(self.globals);
        if let Some(depth) = self.max_scope_depth {
            context.max_depth = depth;
        }
        context
    }
}
