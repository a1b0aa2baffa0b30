//! Statement rendering.
//!
//! Every statement node implements [`Render`]: it evaluates its expressions
//! against the context and appends to the output stream. Errors propagate
//! unchanged to the caller of the render; text written before the failure
//! stays written.

mod control;

use jinja_ir::{Body, Stmt};
use jinja_stack::ensure_sufficient_stack;
use jinja_value::{EvalError, ValuesMap};

use crate::{evaluate, OutStream, RenderContext};

pub use control::should_render;

/// Result of rendering a statement. Output goes to the stream, not here.
pub type RenderResult = Result<(), EvalError>;

/// A node that renders itself into an output stream.
pub trait Render {
    fn render(&self, out: &OutStream, context: &mut RenderContext) -> RenderResult;
}

impl Render for Stmt {
    fn render(&self, out: &OutStream, context: &mut RenderContext) -> RenderResult {
        ensure_sufficient_stack(|| match self {
            Stmt::Text(text) => {
                out.write_str(text);
                Ok(())
            }
            Stmt::Output(expr) => {
                let value = evaluate(expr, context)?;
                out.write_value(&value);
                Ok(())
            }
            Stmt::For(stmt) => stmt.render(out, context),
            Stmt::If(stmt) => stmt.render(out, context),
            Stmt::Set(stmt) => stmt.render(out, context),
        })
    }
}

/// Render statements in order, stopping at the first error.
pub fn render_body(body: &[Stmt], out: &OutStream, context: &mut RenderContext) -> RenderResult {
    body.iter().try_for_each(|stmt| stmt.render(out, context))
}

/// Render `body` into a fresh buffer using an existing context.
pub fn render_with_context(body: &Body, context: &mut RenderContext) -> Result<String, EvalError> {
    let out = OutStream::buffer();
    render_body(body, &out, context)?;
    Ok(out.take_output())
}

/// Render `body` with `params` as the globals scope.
#[tracing::instrument(level = "debug", skip_all, fields(params = params.len()))]
pub fn render_to_string(body: &Body, params: ValuesMap) -> Result<String, EvalError> {
    let mut context = RenderContext::new(params);
    let result = render_with_context(body, &mut context);
    if let Err(err) = &result {
        tracing::debug!(%err, "render failed");
    }
    result
}
