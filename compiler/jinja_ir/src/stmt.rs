//! Statement nodes.

use smallvec::SmallVec;

use crate::Expr;

/// Target names of a `for` or `set`. Almost always one or two.
pub type Names = SmallVec<[String; 2]>;

/// Ordered list of statements: a template, or the body of a block statement.
pub type Body = Vec<Stmt>;

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// Literal template text.
    Text(String),
    /// `{{ expr }}`
    Output(Expr),
    For(ForStmt),
    If(IfStmt),
    Set(SetStmt),
}

/// `{% for a, b in iterable %} body {% else %} else_body {% endfor %}`
#[derive(Clone, Debug, PartialEq)]
pub struct ForStmt {
    pub vars: Names,
    pub iterable: Expr,
    pub body: Body,
    /// Rendered instead of `body` when the loop runs zero times.
    pub else_body: Option<Body>,
}

/// `{% if cond %} body {% elif ... %} ... {% else %} ... {% endif %}`
#[derive(Clone, Debug, PartialEq)]
pub struct IfStmt {
    pub cond: Expr,
    pub body: Body,
    /// `elif` branches followed by an optional final `else`, in source order.
    pub else_branches: Vec<ElseBranch>,
}

/// `elif cond` (with a condition) or `else` (without).
#[derive(Clone, Debug, PartialEq)]
pub struct ElseBranch {
    pub cond: Option<Expr>,
    pub body: Body,
}

/// `{% set a = expr %}` or `{% set a, b = expr %}`
#[derive(Clone, Debug, PartialEq)]
pub struct SetStmt {
    pub fields: Names,
    pub expr: Option<Expr>,
}

impl ForStmt {
    pub fn new<I, S>(vars: I, iterable: Expr, body: Body) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ForStmt {
            vars: vars.into_iter().map(Into::into).collect(),
            iterable,
            body,
            else_body: None,
        }
    }

    #[must_use]
    pub fn with_else(mut self, else_body: Body) -> Self {
        self.else_body = Some(else_body);
        self
    }
}

impl IfStmt {
    pub fn new(cond: Expr, body: Body) -> Self {
        IfStmt {
            cond,
            body,
            else_branches: Vec::new(),
        }
    }

    #[must_use]
    pub fn elif(mut self, cond: Expr, body: Body) -> Self {
        self.else_branches.push(ElseBranch {
            cond: Some(cond),
            body,
        });
        self
    }

    #[must_use]
    pub fn otherwise(mut self, body: Body) -> Self {
        self.else_branches.push(ElseBranch { cond: None, body });
        self
    }
}

impl SetStmt {
    pub fn new<I, S>(fields: I, expr: Expr) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SetStmt {
            fields: fields.into_iter().map(Into::into).collect(),
            expr: Some(expr),
        }
    }
}

impl Stmt {
    pub fn text(text: impl Into<String>) -> Self {
        Stmt::Text(text.into())
    }

    pub fn output(expr: Expr) -> Self {
        Stmt::Output(expr)
    }

    pub fn for_loop<I, S>(vars: I, iterable: Expr, body: Body) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Stmt::For(ForStmt::new(vars, iterable, body))
    }

    pub fn set<I, S>(fields: I, expr: Expr) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Stmt::Set(SetStmt::new(fields, expr))
    }
}

impl From<ForStmt> for Stmt {
    fn from(stmt: ForStmt) -> Self {
        Stmt::For(stmt)
    }
}

impl From<IfStmt> for Stmt {
    fn from(stmt: IfStmt) -> Self {
        Stmt::If(stmt)
    }
}

impl From<SetStmt> for Stmt {
    fn from(stmt: SetStmt) -> Self {
        Stmt::Set(stmt)
    }
}
