use std::fmt;

use serde::Serialize;

/// Decoded constant carried by `NUMBER` / `STRING` tokens and by
/// [`Expr::Literal`](crate::expr::Expr::Literal) nodes.
///
/// `Nil` is its own variant, so it can never be confused with the string
/// `"nil"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    /// IEEE‑754 double. Integral lexemes such as `"3"` are stored as `3.0`.
    Number(f64),

    /// String contents without the surrounding quotes.
    Str(String),

    Bool(bool),

    Nil,
}

impl fmt::Display for Literal {
    /// Canonical text form: numbers use Rust's shortest round-trip `f64`
    /// rendering (`123`, `45.67`), strings print raw.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", n),

            Literal::Str(s) => write!(f, "{}", s),

            Literal::Bool(b) => write!(f, "{}", b),

            Literal::Nil => write!(f, "nil"),
        }
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Number(n)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Str(s.to_owned())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Str(s)
    }
}
