//! Expression nodes.

use jinja_value::Value;

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Literal constant.
    Const(Value),
    /// Variable lookup through the scope stack.
    Var(String),
    /// `object.name`
    Attr { object: Box<Expr>, name: String },
    /// `object[index]`, string keys for maps and integers for lists.
    Index { object: Box<Expr>, index: Box<Expr> },
    /// List or tuple literal: `[a, b]`, `(a, b)`.
    List(Vec<Expr>),
    /// `not expr`
    Not(Box<Expr>),
    /// Global callable: `range(3)`.
    Call { name: String, args: Vec<Expr> },
    /// Method on a value: `loop.cycle("odd", "even")`.
    MethodCall {
        object: Box<Expr>,
        name: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn int(n: i64) -> Self {
        Expr::Const(Value::int(n))
    }

    pub fn str(s: impl Into<String>) -> Self {
        Expr::Const(Value::string(s))
    }

    pub fn bool(b: bool) -> Self {
        Expr::Const(Value::Bool(b))
    }

    pub fn attr(object: Expr, name: impl Into<String>) -> Self {
        Expr::Attr {
            object: Box::new(object),
            name: name.into(),
        }
    }

    pub fn index(object: Expr, index: Expr) -> Self {
        Expr::Index {
            object: Box::new(object),
            index: Box::new(index),
        }
    }

    pub fn not(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            name: name.into(),
            args,
        }
    }

    pub fn method(object: Expr, name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::MethodCall {
            object: Box::new(object),
            name: name.into(),
            args,
        }
    }

    /// `loop.<field>`
    pub fn loop_attr(field: &str) -> Self {
        Expr::attr(Expr::var("loop"), field)
    }
}
