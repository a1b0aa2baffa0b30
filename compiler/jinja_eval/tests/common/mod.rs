//! Helpers shared by the integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use jinja_eval::{init_tracing, render_to_string, Value, ValuesMap};
use jinja_ir::{Body, Expr, Stmt};

pub fn ints(values: &[i64]) -> Value {
    values.iter().copied().map(Value::int).collect()
}

pub fn params<const N: usize>(entries: [(&str, Value); N]) -> ValuesMap {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Render to a string; traces go to stderr when `RUST_LOG` is set.
pub fn render(body: &Body, params: ValuesMap) -> String {
    init_tracing();
    render_to_string(body, params).unwrap()
}

/// `a[{{i}}] = image[{{i}}];\n`
pub fn image_line(var: &str, prefix: &str) -> Vec<Stmt> {
    vec![
        Stmt::text(format!("{prefix}[")),
        Stmt::output(Expr::var(var)),
        Stmt::text("] = image["),
        Stmt::output(Expr::var(var)),
        Stmt::text("];\n"),
    ]
}
