//! Syntax fragments for rewrite patterns.
//!
//! Rules are written as small expression templates (`concat (map f x)`)
//! plus the import declarations that delimit where they apply. This module
//! defines the expression tree those templates parse into. The tree is
//! deliberately small: application, operators, lambdas, literals and
//! grouping cover what rewrite patterns need.

use crate::loc::Loc;
use serde::Serialize;
use std::fmt;

// ────────────────────────────────────────────
// Names
// ────────────────────────────────────────────

/// A possibly-qualified identifier.
///
/// `module` is empty for unqualified names. Operator names (`++`, `.`) are
/// stored verbatim; [`Name::is_operator`] distinguishes them from
/// alphanumeric identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Name {
    /// Dotted module qualifier, empty when unqualified.
    pub module: String,
    /// The identifier or operator itself.
    pub name: String,
}

impl Name {
    /// Creates an unqualified name.
    #[must_use]
    pub fn unqualified(name: impl Into<String>) -> Self {
        Self {
            module: String::new(),
            name: name.into(),
        }
    }

    /// Creates a name qualified by a module path.
    #[must_use]
    pub fn qualified(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// Whether the name carries a module qualifier.
    #[must_use]
    pub fn is_qualified(&self) -> bool {
        !self.module.is_empty()
    }

    /// Whether the base name starts with an upper-case letter.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }

    /// Whether the base name is symbolic rather than alphanumeric.
    #[must_use]
    pub fn is_operator(&self) -> bool {
        self.name
            .chars()
            .next()
            .is_some_and(|c| !c.is_alphanumeric() && c != '_')
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.module.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.module, self.name)
        }
    }
}

// ────────────────────────────────────────────
// Literals
// ────────────────────────────────────────────

/// A literal value inside a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Literal {
    /// Integer literal.
    Int(i64),
    /// String literal.
    Str(String),
    /// Character literal.
    Char(char),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Char(c) => write!(f, "{c:?}"),
        }
    }
}

// ────────────────────────────────────────────
// Expressions
// ────────────────────────────────────────────

/// An expression node with its source location.
///
/// Parsed nodes carry a [`Loc::Known`]; nodes synthesized by rewrites stay
/// [`Loc::Synthetic`] and inherit a location during traversal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    /// Where the node came from, if parsed.
    pub loc: Loc,
    /// The node itself.
    pub kind: ExprKind,
}

/// The shape of an expression node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    /// A variable or function reference.
    Var(Name),
    /// A literal value.
    Lit(Literal),
    /// The `_` placeholder, matching anything without binding.
    Wildcard,
    /// Function application, `f x`.
    App(Box<Expr>, Box<Expr>),
    /// Infix operator application, `a ++ b`.
    Infix(Box<Expr>, Name, Box<Expr>),
    /// A lambda with one or more parameters, `\x -> e`.
    Lambda(Vec<String>, Box<Expr>),
    /// Explicit grouping parentheses from the source.
    Paren(Box<Expr>),
    /// A list literal, `[a, b]`.
    List(Vec<Expr>),
    /// A tuple, `(a, b)`.
    Tuple(Vec<Expr>),
}

impl Expr {
    /// Direct children in source order.
    ///
    /// Application yields function then argument, infix yields left then
    /// right. Names, literals and the wildcard have no children.
    #[must_use]
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Var(_) | ExprKind::Lit(_) | ExprKind::Wildcard => Vec::new(),
            ExprKind::App(fun, arg) => vec![fun, arg],
            ExprKind::Infix(lhs, _, rhs) => vec![lhs, rhs],
            ExprKind::Lambda(_, body) => vec![body],
            ExprKind::Paren(inner) => vec![inner],
            ExprKind::List(items) | ExprKind::Tuple(items) => items.iter().collect(),
        }
    }
}

impl From<ExprKind> for Expr {
    /// Wraps a kind as a synthetic (location-less) node.
    fn from(kind: ExprKind) -> Self {
        Self {
            loc: Loc::Synthetic,
            kind,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

/// Whether a node must be parenthesized in argument position.
fn grouped_as_arg(kind: &ExprKind) -> bool {
    matches!(
        kind,
        ExprKind::App(..) | ExprKind::Infix(..) | ExprKind::Lambda(..)
    )
}

/// Whether a node must be parenthesized in function position.
fn grouped_as_head(kind: &ExprKind) -> bool {
    matches!(kind, ExprKind::Infix(..) | ExprKind::Lambda(..))
}

fn fmt_child(expr: &Expr, grouped: bool, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if grouped {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(name) => {
                if name.is_operator() {
                    write!(f, "({name})")
                } else {
                    write!(f, "{name}")
                }
            }
            Self::Lit(lit) => write!(f, "{lit}"),
            Self::Wildcard => write!(f, "_"),
            Self::App(fun, arg) => {
                fmt_child(fun, grouped_as_head(&fun.kind), f)?;
                write!(f, " ")?;
                fmt_child(arg, grouped_as_arg(&arg.kind), f)
            }
            Self::Infix(lhs, op, rhs) => {
                // A lambda on the left must be fenced off; on the right it
                // extends to the end of the expression anyway.
                fmt_child(lhs, matches!(lhs.kind, Self::Lambda(..)), f)?;
                write!(f, " {op} ")?;
                write!(f, "{rhs}")
            }
            Self::Lambda(params, body) => {
                write!(f, "\\{} -> {body}", params.join(" "))
            }
            Self::Paren(inner) => write!(f, "({inner})"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

// ────────────────────────────────────────────
// Imports
// ────────────────────────────────────────────

/// An import declaration delimiting where a rule applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Import {
    /// Where the declaration was parsed from.
    pub loc: Loc,
    /// Whether the import is `qualified`.
    pub qualified: bool,
    /// Dotted module path.
    pub module: String,
    /// Local alias from an `as` clause.
    pub alias: Option<String>,
    /// Explicit import list; `None` imports the whole module.
    pub names: Option<Vec<String>>,
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "import ")?;
        if self.qualified {
            write!(f, "qualified ")?;
        }
        write!(f, "{}", self.module)?;
        if let Some(alias) = &self.alias {
            write!(f, " as {alias}")?;
        }
        if let Some(names) = &self.names {
            write!(f, " (")?;
            for (i, name) in names.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                let symbolic = name
                    .chars()
                    .next()
                    .is_some_and(|c| !c.is_alphanumeric() && c != '_');
                if symbolic {
                    write!(f, "({name})")?;
                } else {
                    write!(f, "{name}")?;
                }
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}
