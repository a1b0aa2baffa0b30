#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test code: panics provide clear failure messages"
)]

//! Tracing setup, in its own test binary so the environment is not shared.

mod common;

use common::{ints, params, render};
use jinja_eval::init_tracing;
use jinja_ir::{Expr, Stmt};
use pretty_assertions::assert_eq;

#[test]
fn init_tracing_installs_filter_once() {
    std::env::set_var("RUST_LOG", "jinja_eval=trace");
    init_tracing();
    init_tracing();
    assert!(tracing::enabled!(target: "jinja_eval", tracing::Level::TRACE));
    assert!(!tracing::enabled!(target: "unrelated", tracing::Level::TRACE));

    let tpl = vec![Stmt::for_loop(
        ["x"],
        Expr::var("xs"),
        vec![Stmt::output(Expr::var("x"))],
    )];
    assert_eq!(render(&tpl, params([("xs", ints(&[1, 2]))])), "12");
}
