use crate::expr::{Expr, Visitor};
use crate::token::Token;
use crate::value::Literal;

/// Converts an expression to the Crafting‑Interpreters prefix form,
/// e.g. `(* (- 123) (group 45.67))`.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(expr: &Expr<'_>) -> String {
        expr.accept(&mut AstPrinter)
    }

    /// `(name e1 e2 …)` with single spaces and no trailing space.
    fn parenthesize(&mut self, name: &str, exprs: &[&Expr<'_>]) -> String {
        let mut s: String = format!("({}", name);

        for expr in exprs {
            s.push(' ');
            s.push_str(&expr.accept(self));
        }

        s.push(')');
        s
    }
}

impl Visitor<String> for AstPrinter {
    fn visit_binary(&mut self, left: &Expr<'_>, operator: &Token<'_>, right: &Expr<'_>) -> String {
        self.parenthesize(operator.lexeme, &[left, right])
    }

    fn visit_grouping(&mut self, expression: &Expr<'_>) -> String {
        self.parenthesize("group", &[expression])
    }

    fn visit_literal(&mut self, value: &Literal) -> String {
        // nil, true/false, raw string contents, or the host's f64 rendering
        value.to_string()
    }

    fn visit_unary(&mut self, operator: &Token<'_>, right: &Expr<'_>) -> String {
        self.parenthesize(operator.lexeme, &[right])
    }
}
