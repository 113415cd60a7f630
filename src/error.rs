//! Centralised error hierarchy for the **Lox front end**.
//!
//! All subsystems (scanner, parser, schema generator, CLI) convert their
//! internal failure modes into one of the variants defined here.  This enables
//! a uniform `Result<T>` alias throughout the crate and ergonomic
//! inter‑operation with `anyhow` in the binaries.
//!
//! The module **does not** print diagnostics itself; that is the job of a
//! [`Reporter`](crate::reporter::Reporter).

use std::io;
use thiserror::Error;

use log::info;

use crate::token::{Token, TokenType};

/// Canonical error type used throughout the crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic diagnostic attached to the offending token.
    #[error("[line {line}] Error{location}: {message}")]
    Syntax {
        message: String,

        /// Either `" at end"` or `" at '<lexeme>'"`.
        location: String,

        line: usize,
    },

    /// Parsing stopped. The diagnostic has already gone to the reporter.
    #[error("parse aborted after reported error")]
    ParseAborted,

    /// Malformed node-schema line fed to the AST generator.
    #[error("Invalid node schema: {0}")]
    Schema(String),

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// UTF‑8 decoding failure when ingesting external text.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        LoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**: a diagnostic located at `token`.
    pub fn syntax<S: Into<String>>(token: &Token<'_>, msg: S) -> Self {
        let message: String = msg.into();

        let location: String = if token.token_type == TokenType::EOF {
            " at end".to_string()
        } else {
            format!(" at '{}'", token.lexeme)
        };

        info!(
            "Creating Syntax error: line={}, location={}, msg={}",
            token.line, location, message
        );

        LoxError::Syntax {
            message,
            location,
            line: token.line,
        }
    }

    /// Helper constructor for the **schema generator**.
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Schema error: msg={}", message);

        LoxError::Schema(message)
    }

    /// Source line of a located error, if it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoxError::Lex { line, .. } | LoxError::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;
