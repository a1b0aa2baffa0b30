//! Control-flow statements: `for`, `if`/`elif`/`else` and `set`.

use jinja_ir::{ElseBranch, ForStmt, IfStmt, SetStmt};
use jinja_value::{EvalError, ListItemAccessor, Value, ValuesMap};

use super::{render_body, Render, RenderResult};
use crate::loop_names::{FIRST, INDEX, INDEX0, LAST, LENGTH, LOOP, NEXTITEM, PREVITEM};
use crate::{evaluate, OutStream, RenderContext};

impl Render for ForStmt {
    /// Render the body once per element of the iterable.
    ///
    /// The loop gets its own scope holding `loop` and the loop variables,
    /// popped when the loop ends however it ends. A value that is not
    /// list-shaped iterates zero times. The `else` body renders only after
    /// zero iterations, outside the loop scope.
    #[tracing::instrument(level = "debug", skip_all)]
    fn render(&self, out: &OutStream, context: &mut RenderContext) -> RenderResult {
        let source = evaluate(&self.iterable, context)?;
        let items = source.list_accessor();
        let length = items.size();
        tracing::debug!(length, source = source.type_name(), "for loop");

        {
            let mut scoped = context.scoped()?;
            render_iterations(self, items.as_ref(), out, &mut scoped)?;
        }

        if length == 0 {
            if let Some(else_body) = &self.else_body {
                render_body(else_body, out, context)?;
            }
        }
        Ok(())
    }
}

fn render_iterations(
    stmt: &ForStmt,
    items: &dyn ListItemAccessor,
    out: &OutStream,
    context: &mut RenderContext,
) -> RenderResult {
    let length = items.size();
    let mut loop_fields = ValuesMap::default();
    loop_fields.insert(LENGTH.to_string(), int_value(length));

    let mut prev: Option<Value> = None;
    let mut next = (length > 0).then(|| items.value_by_index(0));

    for i in 0..length {
        let Some(item) = next.take() else {
            break;
        };
        next = (i + 1 < length).then(|| items.value_by_index(i + 1));
        tracing::trace!(index0 = i, "loop iteration");

        loop_fields.insert(INDEX.to_string(), int_value(i + 1));
        loop_fields.insert(INDEX0.to_string(), int_value(i));
        loop_fields.insert(FIRST.to_string(), Value::Bool(i == 0));
        loop_fields.insert(LAST.to_string(), Value::Bool(i + 1 == length));
        // previtem is never set on the first pass; nextitem is removed on
        // the last one.
        if let Some(prev) = &prev {
            loop_fields.insert(PREVITEM.to_string(), prev.clone());
        }
        match &next {
            Some(next) => {
                loop_fields.insert(NEXTITEM.to_string(), next.clone());
            }
            None => {
                loop_fields.remove(NEXTITEM);
            }
        }
        context.define(LOOP, Value::map(loop_fields.clone()));

        bind_loop_vars(&stmt.vars, &item, context)?;
        render_body(&stmt.body, out, context)?;
        prev = Some(item);
    }
    Ok(())
}

/// Several names and a map-shaped element: bind each name to the field of
/// the same name. Otherwise the first name takes the whole element.
fn bind_loop_vars(
    vars: &[String],
    item: &Value,
    context: &mut RenderContext,
) -> Result<(), EvalError> {
    if vars.len() > 1 && item.is_map() {
        for name in vars {
            let field = item.subscript(name)?;
            context.define(name.as_str(), field);
        }
    } else if let Some(name) = vars.first() {
        context.define(name.as_str(), item.clone());
    }
    Ok(())
}

fn int_value(n: usize) -> Value {
    Value::int(i64::try_from(n).unwrap_or(i64::MAX))
}

impl Render for IfStmt {
    /// First truthy branch wins; later conditions are not evaluated.
    #[tracing::instrument(level = "debug", skip_all)]
    fn render(&self, out: &OutStream, context: &mut RenderContext) -> RenderResult {
        if evaluate(&self.cond, context)?.is_truthy() {
            return render_body(&self.body, out, context);
        }
        for branch in &self.else_branches {
            if should_render(branch, context)? {
                return branch.render(out, context);
            }
        }
        Ok(())
    }
}

/// Whether an `elif`/`else` branch is taken. A bare `else` always is, and
/// evaluates nothing.
pub fn should_render(branch: &ElseBranch, context: &RenderContext) -> Result<bool, EvalError> {
    match &branch.cond {
        None => Ok(true),
        Some(cond) => Ok(evaluate(cond, context)?.is_truthy()),
    }
}

impl Render for ElseBranch {
    fn render(&self, out: &OutStream, context: &mut RenderContext) -> RenderResult {
        render_body(&self.body, out, context)
    }
}

impl Render for SetStmt {
    /// Bind into the innermost scope, shadowing any outer binding.
    #[tracing::instrument(level = "debug", skip_all)]
    fn render(&self, _out: &OutStream, context: &mut RenderContext) -> RenderResult {
        let Some(expr) = &self.expr else {
            return Ok(());
        };
        let value = evaluate(expr, context)?;
        if let [name] = self.fields.as_slice() {
            context.define(name.as_str(), value);
        } else {
            for name in &self.fields {
                let field = value.subscript(name)?;
                context.define(name.as_str(), field);
            }
        }
        Ok(())
    }
}
