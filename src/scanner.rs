//! Module `scanner` implements a one‑pass, streaming lexer for Lox source.
//!
//! It turns a `&str` into a sequence of `Token<'a>`s, skipping whitespace and
//! comments, and emitting exactly one `EOF` token at the end. It is a
//! `FusedIterator`, so it chains safely with other iterator adapters.
//!
//! # Public API
//!
//! - `Scanner::new(src: &'a str) -> Scanner<'a>`
//!   Create a new lexer over the input text.
//!
//! - `impl Iterator for Scanner<'a>`
//!   Yields `Result<Token<'a>, LoxError>`; `Err` reports a lexing error with
//!   line information and scanning resumes at the next byte.
//!
//! - `scan_tokens(src)` collects a whole buffer into an `EOF`-terminated
//!   token vector plus the errors met along the way.
//!
//! # Token Recognition
//!
//! - Single‑character tokens: `(`, `)`, `{`, `}`, `,`, `.`, `-`, `+`, `;`, `*`.
//! - Two‑character operators: `!=`, `==`, `<=`, `>=`.
//! - String literals: `"` … `"`, multi‑line allowed; the payload excludes the
//!   quotes.
//! - Numeric literals: integer part with optional fraction, decoded to `f64`;
//!   literals that overflow to infinity are lexical errors.
//! - Identifiers/keywords, resolved via a perfect‑hash `KEYWORDS` map.
//! - Comments (`//` to end of line) are skipped with `memchr`.
//!
//! # Example
//!
//! ```rust
//! use lox_syntax::scanner::Scanner;
//!
//! for result in Scanner::new("1 + 2 // sum") {
//!     match result {
//!         Ok(token) => println!("{}", token),
//!         Err(err) => eprintln!("{}", err),
//!     }
//! }
//! ```

use crate::error::{LoxError, Result};
use crate::token::{Token, TokenType};
use crate::value::Literal;
use log::{debug, info};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static str, TokenType> = phf_map! {
    "and"    => TokenType::AND,
    "class"  => TokenType::CLASS,
    "else"   => TokenType::ELSE,
    "false"  => TokenType::FALSE,
    "fun"    => TokenType::FUN,
    "for"    => TokenType::FOR,
    "if"     => TokenType::IF,
    "nil"    => TokenType::NIL,
    "or"     => TokenType::OR,
    "print"  => TokenType::PRINT,
    "return" => TokenType::RETURN,
    "super"  => TokenType::SUPER,
    "this"   => TokenType::THIS,
    "true"   => TokenType::TRUE,
    "var"    => TokenType::VAR,
    "while"  => TokenType::WHILE,
};

/// A single pass **scanner** that converts source text into [`Token`]s.
/// The lifetime `'a` ties every emitted token's `lexeme` back to `src`.
pub struct Scanner<'a> {
    src: &'a str,                          // entire source text
    start: usize,                          // first byte of the current lexeme
    curr: usize,                           // one past the last byte examined
    line: usize,                           // 1‑based line counter
    pending: Option<(TokenType, Option<Literal>)>, // recognised token waiting to be emitted
    emitted_eof: bool,
}

impl<'a> Scanner<'a> {
    /// Create a new lexer over `src`.
    #[inline]
    pub fn new(src: &'a str) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            start: 0,
            curr: 0,
            line: 1,
            pending: None,
            emitted_eof: false,
        }
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.src.len()
    }

    /// Advance one byte and return it. Callers guard with [`Self::is_at_end`].
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.bytes()[self.curr];
        self.curr += 1;
        b
    }

    /// Current byte, or `0` past the end.
    #[inline(always)]
    fn peek(&self) -> u8 {
        self.bytes().get(self.curr).copied().unwrap_or(0)
    }

    /// One byte beyond [`Self::peek`], or `0` past the end.
    #[inline(always)]
    fn peek_next(&self) -> u8 {
        self.bytes().get(self.curr + 1).copied().unwrap_or(0)
    }

    /// Consume a byte **iff** it matches `expected`.
    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    #[inline(always)]
    fn emit(&mut self, token_type: TokenType) {
        self.pending = Some((token_type, None));
    }

    #[inline(always)]
    fn emit_if_eq(&mut self, matched: TokenType, otherwise: TokenType) {
        let tt = if self.match_byte(b'=') { matched } else { otherwise };

        self.emit(tt);
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan a *single* lexeme starting at `self.curr`. A recognised token is
    /// stored in `self.pending`; whitespace and comments leave it `None`.
    fn scan_token(&mut self) -> Result<()> {
        let b = self.advance();

        match b {
            // ── single‑character punctuators ──────────────────────────────
            b'(' => self.emit(TokenType::LEFT_PAREN),
            b')' => self.emit(TokenType::RIGHT_PAREN),
            b'{' => self.emit(TokenType::LEFT_BRACE),
            b'}' => self.emit(TokenType::RIGHT_BRACE),
            b',' => self.emit(TokenType::COMMA),
            b'.' => self.emit(TokenType::DOT),
            b'-' => self.emit(TokenType::MINUS),
            b'+' => self.emit(TokenType::PLUS),
            b';' => self.emit(TokenType::SEMICOLON),
            b'*' => self.emit(TokenType::STAR),

            // ── two‑character operators (!=, ==, <=, >=) ─────────────────
            b'!' => self.emit_if_eq(TokenType::BANG_EQUAL, TokenType::BANG),
            b'=' => self.emit_if_eq(TokenType::EQUAL_EQUAL, TokenType::EQUAL),
            b'<' => self.emit_if_eq(TokenType::LESS_EQUAL, TokenType::LESS),
            b'>' => self.emit_if_eq(TokenType::GREATER_EQUAL, TokenType::GREATER),

            // ── whitespace / newline ─────────────────────────────────────
            b' ' | b'\r' | b'\t' => {}

            b'\n' => {
                self.line += 1;
            }

            // ── comments (// … until newline) ────────────────────────────
            b'/' => {
                if self.match_byte(b'/') {
                    match memchr(b'\n', &self.bytes()[self.curr..]) {
                        Some(pos) => self.curr += pos,
                        None => self.curr = self.src.len(),
                    }

                    return Ok(());
                }

                self.emit(TokenType::SLASH);
            }

            b'"' => {
                return self.parse_string();
            }

            b'0'..=b'9' => {
                return self.parse_number();
            }

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                self.parse_identifier();
            }

            // ── unexpected character ─────────────────────────────────────
            _ => {
                // Skip the whole UTF-8 sequence so the next lexeme starts on
                // a char boundary.
                let ch: char = self.src[self.start..].chars().next().unwrap_or('\u{FFFD}');
                self.curr = self.start + ch.len_utf8();

                return Err(LoxError::lex(
                    self.line,
                    format!("Unexpected character: {}", ch),
                ));
            }
        }

        Ok(())
    }

    /// Parse a double‑quoted string literal. `self.start` points at the
    /// opening `"`; on success `self.curr` is past the closing one.
    fn parse_string(&mut self) -> Result<()> {
        let opening_line: usize = self.line;

        while !self.is_at_end() && self.peek() != b'"' {
            if self.advance() == b'\n' {
                self.line += 1;
            }
        }

        if self.is_at_end() {
            debug!("Unterminated string opened on line {}", opening_line);

            return Err(LoxError::lex(self.line, "Unterminated string."));
        }

        self.advance(); // closing quote

        let contents: &str = &self.src[self.start + 1..self.curr - 1];

        self.pending = Some((TokenType::STRING, Some(Literal::Str(contents.to_owned()))));

        Ok(())
    }

    /// Parse a numeric literal (`123`, `3.14`). The fraction is optional and
    /// a trailing `.` is not part of the number. Literals too large for an
    /// `f64` are rejected.
    fn parse_number(&mut self) -> Result<()> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.advance(); // "."

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text: &str = &self.src[self.start..self.curr];
        let n: f64 = text.parse::<f64>().unwrap_or(0.0); // digits only, cannot fail

        if !n.is_finite() {
            return Err(LoxError::lex(self.line, "Number literal is too large."));
        }

        self.pending = Some((TokenType::NUMBER, Some(Literal::Number(n))));

        Ok(())
    }

    /// Parse an identifier and decide if it is a **keyword** or a plain
    /// `IDENTIFIER`.
    fn parse_identifier(&mut self) {
        while {
            let c: u8 = self.peek();
            c.is_ascii_alphanumeric() || c == b'_'
        } {
            self.advance();
        }

        let text: &str = &self.src[self.start..self.curr];

        let tt: TokenType = KEYWORDS.get(text).copied().unwrap_or(TokenType::IDENTIFIER);

        self.emit(tt);
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted_eof {
            return None;
        }

        loop {
            if self.is_at_end() {
                self.emitted_eof = true;

                return Some(Ok(Token::simple(TokenType::EOF, "", self.line)));
            }

            self.start = self.curr;
            self.pending = None;

            if let Err(e) = self.scan_token() {
                return Some(Err(e));
            }

            if let Some((tt, literal)) = self.pending.take() {
                let lexeme: &'a str = &self.src[self.start..self.curr];
                debug!("Scanned token ({:?}) on line {}", tt, self.line);

                return Some(Ok(Token::new(tt, lexeme, literal, self.line)));
            }
            // whitespace / comment → keep going
        }
    }
}

impl<'a> FusedIterator for Scanner<'a> {}

/// Scan all of `src`, splitting the results into the token sequence (always
/// ending in `EOF`) and the lexical errors encountered.
pub fn scan_tokens(src: &str) -> (Vec<Token<'_>>, Vec<LoxError>) {
    let mut tokens: Vec<Token<'_>> = Vec::new();
    let mut errors: Vec<LoxError> = Vec::new();

    for result in Scanner::new(src) {
        match result {
            Ok(token) => tokens.push(token),
            Err(e) => errors.push(e),
        }
    }

    info!(
        "Scanned {} tokens with {} errors",
        tokens.len(),
        errors.len()
    );

    (tokens, errors)
}
