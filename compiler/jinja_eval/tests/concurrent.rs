#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test code: panics provide clear failure messages"
)]

//! One tree rendered from many threads, each with its own context.

mod common;

use std::sync::Arc;

use common::{ints, params};
use jinja_eval::{render_body, render_to_string, OutStream, RenderContext, Value};
use jinja_ir::{Expr, Stmt};
use jinja_value::{reflect, Reflect};
use pretty_assertions::assert_eq;
use rayon::prelude::*;

fn template() -> Vec<Stmt> {
    vec![
        Stmt::output(Expr::var("who")),
        Stmt::text(":"),
        Stmt::for_loop(
            ["i"],
            Expr::var("its"),
            vec![
                Stmt::output(Expr::var("i")),
                Stmt::output(Expr::method(
                    Expr::var("loop"),
                    "cycle",
                    vec![Expr::str("a"), Expr::str("b")],
                )),
            ],
        ),
    ]
}

#[test]
fn concurrent_renders_share_tree() {
    let tpl = Arc::new(template());
    let results: Vec<String> = (0..64_i64)
        .into_par_iter()
        .map(|n| {
            let its = ints(&[n, n + 1, n + 2]);
            render_to_string(&tpl, params([("who", Value::int(n)), ("its", its)])).unwrap()
        })
        .collect();

    for (n, result) in (0_i64..).zip(&results) {
        assert_eq!(result, &format!("{n}:{n}a{}b{}a", n + 1, n + 2));
    }
}

#[test]
fn concurrent_renders_share_reflected_data() {
    let tpl = template();
    let shared = Arc::new(vec![1_i64, 2, 3]);
    let results: Vec<String> = (0..16_i64)
        .into_par_iter()
        .map(|n| {
            let mut context = RenderContext::builder()
                .global("who", Value::int(n))
                .global("its", Vec::reflect_shared(Arc::clone(&shared)))
                .build();
            let out = OutStream::buffer();
            render_body(&tpl, &out, &mut context).unwrap();
            out.output()
        })
        .collect();

    for (n, result) in (0_i64..).zip(&results) {
        assert_eq!(result, &format!("{n}:1a2b3a"));
    }
    assert_eq!(reflect(shared.to_vec()), ints(&[1, 2, 3]));
}
