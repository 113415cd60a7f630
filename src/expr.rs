//! Expression AST.
//!
//! `Expr` is a closed sum of four variants. Tree operations are written as
//! [`Visitor`] implementations, so adding a consumer (printer, evaluator,
//! resolver, …) never touches the node types; adding a variant means
//! updating every visitor, which the compiler enforces.
//!
//! Node shapes, in the schema notation understood by
//! [`generate_ast`](crate::generate_ast):
//!
//! ```text
//! Binary   : Expr left, Token operator, Expr right
//! Grouping : Expr expression
//! Literal  : Literal value
//! Unary    : Token operator, Expr right
//! ```

use std::fmt;

use serde::Serialize;

use crate::ast_printer::AstPrinter;
use crate::token::Token;
use crate::value::Literal;

/// Parsed expression. Each node exclusively owns its children and is never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Expr<'a> {
    /// Infix binary operator expression
    /// *Example:* `a + b`, `x <= y`
    Binary {
        left: Box<Expr<'a>>,
        /// Operator token such as `+`, `*`, `==`, …
        operator: Token<'a>,
        right: Box<Expr<'a>>,
    },

    /// Parenthesised sub‑expression: `"(" expression ")"`.
    Grouping { expression: Box<Expr<'a>> },

    /// A literal constant: number, string, `true`, `false`, or `nil`.
    Literal { value: Literal },

    /// Prefix unary operator expression
    /// *Example:* `!ready` or `-42`
    Unary {
        /// The operator token (`!` or `-`).
        operator: Token<'a>,
        right: Box<Expr<'a>>,
    },
}

/// One handler per [`Expr`] variant. `R` is whatever the operation produces.
pub trait Visitor<R> {
    fn visit_binary(&mut self, left: &Expr<'_>, operator: &Token<'_>, right: &Expr<'_>) -> R;

    fn visit_grouping(&mut self, expression: &Expr<'_>) -> R;

    fn visit_literal(&mut self, value: &Literal) -> R;

    fn visit_unary(&mut self, operator: &Token<'_>, right: &Expr<'_>) -> R;
}

impl<'a> Expr<'a> {
    pub fn binary(left: Expr<'a>, operator: Token<'a>, right: Expr<'a>) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn grouping(expression: Expr<'a>) -> Self {
        Expr::Grouping {
            expression: Box::new(expression),
        }
    }

    pub fn literal(value: impl Into<Literal>) -> Self {
        Expr::Literal {
            value: value.into(),
        }
    }

    pub fn nil() -> Self {
        Expr::Literal {
            value: Literal::Nil,
        }
    }

    pub fn unary(operator: Token<'a>, right: Expr<'a>) -> Self {
        Expr::Unary {
            operator,
            right: Box::new(right),
        }
    }

    /// Dispatch to the handler for this node's variant and return its result.
    pub fn accept<R, V: Visitor<R> + ?Sized>(&self, visitor: &mut V) -> R {
        match self {
            Expr::Binary {
                left,
                operator,
                right,
            } => visitor.visit_binary(left, operator, right),

            Expr::Grouping { expression } => visitor.visit_grouping(expression),

            Expr::Literal { value } => visitor.visit_literal(value),

            Expr::Unary { operator, right } => visitor.visit_unary(operator, right),
        }
    }
}

impl fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&AstPrinter::print(self))
    }
}
