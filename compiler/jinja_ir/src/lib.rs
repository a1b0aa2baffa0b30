//! Jinja IR - the parsed template tree.
//!
//! A parser produces these nodes; the interpreter in `jinja_eval` walks them.
//! The tree is immutable once built and holds no per-render state, so one
//! tree can be rendered from several threads at once.
//!
//! Builder helpers stand in for a parser when assembling trees by hand:
//!
//! ```text
//! // {% for i in its %}a[{{i}}];{% endfor %}
//! let tpl = vec![Stmt::for_loop(["i"], Expr::var("its"), vec![
//!     Stmt::text("a["),
//!     Stmt::output(Expr::var("i")),
//!     Stmt::text("];"),
//! ])];
//! ```

mod expr;
mod stmt;

pub use expr::Expr;
pub use stmt::{Body, ElseBranch, ForStmt, IfStmt, Names, SetStmt, Stmt};
