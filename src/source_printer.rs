//! Renders an AST back into Lox source text.
//!
//! Groupings are the only parentheses emitted, so any tree built by the
//! parser re-parses to the same shape: `(1 + 2) * -3` prints as
//! `(1 + 2) * -3`. Hand-built trees that rely on implicit nesting without a
//! `Grouping` node do not round-trip.

use crate::expr::{Expr, Visitor};
use crate::token::Token;
use crate::value::Literal;

pub struct SourcePrinter;

impl SourcePrinter {
    pub fn print(expr: &Expr<'_>) -> String {
        expr.accept(&mut SourcePrinter)
    }
}

impl Visitor<String> for SourcePrinter {
    fn visit_binary(&mut self, left: &Expr<'_>, operator: &Token<'_>, right: &Expr<'_>) -> String {
        format!(
            "{} {} {}",
            left.accept(self),
            operator.lexeme,
            right.accept(self)
        )
    }

    fn visit_grouping(&mut self, expression: &Expr<'_>) -> String {
        format!("({})", expression.accept(self))
    }

    fn visit_literal(&mut self, value: &Literal) -> String {
        match value {
            Literal::Str(s) => format!("\"{}\"", s),
            other => other.to_string(),
        }
    }

    fn visit_unary(&mut self, operator: &Token<'_>, right: &Expr<'_>) -> String {
        format!("{}{}", operator.lexeme, right.accept(self))
    }
}
