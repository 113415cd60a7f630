//! Diagnostic sinks for the parser.
//!
//! A [`Reporter`] is handed to [`Parser::new`](crate::parser::Parser::new)
//! explicitly. It must not fail back into the parser.

use log::debug;

use crate::error::LoxError;
use crate::token::Token;

/// Receives one user-visible diagnostic per parse failure.
pub trait Reporter {
    fn report(&mut self, token: &Token<'_>, message: &str);
}

/// Prints each diagnostic to stderr, e.g.
/// `[line 1] Error at end: Expect expression.`
#[derive(Debug, Default)]
pub struct StderrReporter {
    had_error: bool,
}

impl StderrReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }
}

impl Reporter for StderrReporter {
    fn report(&mut self, token: &Token<'_>, message: &str) {
        let diagnostic: LoxError = LoxError::syntax(token, message);

        debug!("Reporting diagnostic: {}", diagnostic);

        eprintln!("{}", diagnostic);

        self.had_error = true;
    }
}

/// Keeps diagnostics in memory instead of printing them.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    diagnostics: Vec<LoxError>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[LoxError] {
        &self.diagnostics
    }

    /// Rendered diagnostic lines, in report order.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, token: &Token<'_>, message: &str) {
        debug!("Collecting diagnostic at line {}: {}", token.line, message);

        self.diagnostics.push(LoxError::syntax(token, message));
    }
}
