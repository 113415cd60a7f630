/*!
Time & Space Complexity — whole‑file overview
============================================

Definitions
-----------
* **n** = number of tokens (including the sole EOF).
* **m** = number of AST nodes (`m ≤ n`, each consumed token contributes at most one node).

### Time

| Phase / function              | Cost | Rationale                                              |
|-------------------------------|-----:|--------------------------------------------------------|
| `Parser::parse`               | Θ(k) | Each of the `k ≤ n` consumed tokens is seen once.      |
| Individual productions        | O(1) per token | No backtracking; the cursor never rewinds.   |

### Space

| Structure                | Asymptotic | Notes                                              |
|--------------------------|-----------:|----------------------------------------------------|
| Borrowed token slice     | O(n)       | Owned by the caller.                               |
| AST (`Box`)              | O(m)       | One `Box` per child; operator tokens are cloned.   |
| Parser scratch fields    | O(1)       | Cursor and reporter handle.                        |

Call‑stack depth grows with syntactic nesting.

### Logging Policy

| Location                     | Level  | Purpose                                   |
|------------------------------|--------|-------------------------------------------|
| `Parser::new`, `parse`       | `info` | Lifecycle milestones.                     |
| Grammar levels               | `debug`| Folding of operators into the tree.       |
| Error path (`error`)         | `debug`| Context before unwinding.                 |

--------------------------------------------------------------------------------
Grammar (precedence low → high, binary levels left‑associative)
--------------------------------------------------------------

```text
expression  → equality ;
equality    → comparison ( ( "!=" | "==" ) comparison )* ;
comparison  → term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
term        → factor ( ( "-" | "+" ) factor )* ;
factor      → unary ( ( "/" | "*" ) unary )* ;
unary       → ( "!" | "-" ) unary | primary ;
primary     → NUMBER | STRING | "true" | "false" | "nil"
            | "(" expression ")" ;
```

Binary levels fold iteratively, so `a - b - c` is `(a - b) - c`; `unary`
recurses directly, so `--x` is `-(-x)`.

On the first error the offending token and message go to the
[`Reporter`], then [`LoxError::ParseAborted`] unwinds every pending
production back to the entry point. There is no synchronisation.
Unary operators and groupings may nest at most [`MAX_NESTING`] deep.
*/

use crate::error::{LoxError, Result};
use crate::expr::Expr;
use crate::reporter::Reporter;
use crate::token::{Token, TokenType};

use log::{debug, info};

const EQUALITY_OPS: &[TokenType] = &[TokenType::BANG_EQUAL, TokenType::EQUAL_EQUAL];

const COMPARISON_OPS: &[TokenType] = &[
    TokenType::GREATER,
    TokenType::GREATER_EQUAL,
    TokenType::LESS,
    TokenType::LESS_EQUAL,
];

const TERM_OPS: &[TokenType] = &[TokenType::MINUS, TokenType::PLUS];

const FACTOR_OPS: &[TokenType] = &[TokenType::SLASH, TokenType::STAR];

const UNARY_OPS: &[TokenType] = &[TokenType::BANG, TokenType::MINUS];

/// Deepest chain of unary operators and groupings accepted before parsing
/// fails, keeping recursion well inside the thread's stack.
pub const MAX_NESTING: usize = 128;

/// Recursive‑descent parser over an immutable, `EOF`‑terminated token slice.
/// `'t` borrows the token slice, `'a` the source text the lexemes point into.
pub struct Parser<'t, 'a, 'r> {
    tokens: &'t [Token<'a>],
    current: usize,
    depth: usize,
    reporter: &'r mut dyn Reporter,
}

impl<'t, 'a, 'r> Parser<'t, 'a, 'r> {
    /// Construct a new parser. `tokens` must end with an `EOF` token, as
    /// produced by the scanner.
    pub fn new(tokens: &'t [Token<'a>], reporter: &'r mut dyn Reporter) -> Self {
        info!("Parser created with {} tokens", tokens.len());

        debug_assert!(
            matches!(tokens.last(), Some(t) if t.token_type == TokenType::EOF),
            "token sequence must end with EOF"
        );

        Self {
            tokens,
            current: 0,
            depth: 0,
            reporter,
        }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse a single expression.
    ///
    /// Tokens after the expression are left unconsumed; see
    /// [`Parser::remaining`] and [`Parser::parse_complete`].
    pub fn parse(&mut self) -> Result<Expr<'a>> {
        info!("Beginning parse phase at token {}", self.current);

        let expr: Expr<'a> = self.expression()?;

        info!("Parsed expression ending before token {}", self.current);

        Ok(expr)
    }

    /// Parse a single expression that must span the whole input. A token
    /// other than `EOF` after it is reported as "Expect end of expression.".
    pub fn parse_complete(&mut self) -> Result<Expr<'a>> {
        let expr: Expr<'a> = self.parse()?;

        if !self.is_at_end() {
            let token: &'t Token<'a> = self.peek();

            return Err(self.error(token, "Expect end of expression."));
        }

        Ok(expr)
    }

    /// Tokens not yet consumed, always ending with `EOF`.
    pub fn remaining(&self) -> &'t [Token<'a>] {
        &self.tokens[self.current..]
    }

    // ─────────────────────── expression rules ─────────────────────

    fn expression(&mut self) -> Result<Expr<'a>> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expr<'a>> {
        self.binary_level(EQUALITY_OPS, Self::comparison)
    }

    fn comparison(&mut self) -> Result<Expr<'a>> {
        self.binary_level(COMPARISON_OPS, Self::term)
    }

    fn term(&mut self) -> Result<Expr<'a>> {
        self.binary_level(TERM_OPS, Self::factor)
    }

    fn factor(&mut self) -> Result<Expr<'a>> {
        self.binary_level(FACTOR_OPS, Self::unary)
    }

    /// One left‑associative precedence level: an operand from `operand`,
    /// then any number of `ops operand` pairs folded into the left side.
    fn binary_level(
        &mut self,
        ops: &[TokenType],
        operand: fn(&mut Self) -> Result<Expr<'a>>,
    ) -> Result<Expr<'a>> {
        let mut expr: Expr<'a> = operand(self)?;

        while self.matches(ops) {
            let operator: Token<'a> = self.previous().clone();
            let right: Expr<'a> = operand(self)?;

            debug!(
                "Folding binary '{}' on line {}",
                operator.lexeme, operator.line
            );

            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    /// Every unary operator and every grouping re-enters here, so this is
    /// where nesting depth is bounded.
    fn unary(&mut self) -> Result<Expr<'a>> {
        if self.depth >= MAX_NESTING {
            let token: &'t Token<'a> = self.peek();

            return Err(self.error(token, "Expression nests too deeply."));
        }

        self.depth += 1;
        let result: Result<Expr<'a>> = self.unary_operand();
        self.depth -= 1;

        result
    }

    fn unary_operand(&mut self) -> Result<Expr<'a>> {
        if self.matches(UNARY_OPS) {
            let operator: Token<'a> = self.previous().clone();
            let right: Expr<'a> = self.unary()?;

            return Ok(Expr::unary(operator, right));
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Expr<'a>> {
        if self.matches(&[TokenType::FALSE]) {
            return Ok(Expr::literal(false));
        }

        if self.matches(&[TokenType::TRUE]) {
            return Ok(Expr::literal(true));
        }

        if self.matches(&[TokenType::NIL]) {
            return Ok(Expr::nil());
        }

        if self.matches(&[TokenType::NUMBER, TokenType::STRING]) {
            let token: &'t Token<'a> = self.previous();

            return match &token.literal {
                Some(value) => Ok(Expr::literal(value.clone())),

                // Scanner-produced tokens always carry a payload.
                None => Err(self.error(token, "Expect literal value.")),
            };
        }

        if self.matches(&[TokenType::LEFT_PAREN]) {
            let expr: Expr<'a> = self.expression()?;

            self.consume(TokenType::RIGHT_PAREN, "Expect ')' after expression.")?;

            return Ok(Expr::grouping(expr));
        }

        let token: &'t Token<'a> = self.peek();

        Err(self.error(token, "Expect expression."))
    }

    // ────────────────────── utility helpers ───────────────────────

    /// Consume the current token if its type is any of `types`.
    #[inline(always)]
    fn matches(&mut self, types: &[TokenType]) -> bool {
        if types.iter().any(|&ttype| self.check(ttype)) {
            self.advance();

            return true;
        }

        false
    }

    #[inline(always)]
    fn consume(&mut self, ttype: TokenType, message: &str) -> Result<&'t Token<'a>> {
        if self.check(ttype) {
            return Ok(self.advance());
        }

        let token: &'t Token<'a> = self.peek();

        Err(self.error(token, message))
    }

    #[inline(always)]
    fn check(&self, ttype: TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }

        self.peek().token_type == ttype
    }

    #[inline(always)]
    fn advance(&mut self) -> &'t Token<'a> {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::EOF
    }

    #[inline(always)]
    fn peek(&self) -> &'t Token<'a> {
        &self.tokens[self.current]
    }

    #[inline(always)]
    fn previous(&self) -> &'t Token<'a> {
        &self.tokens[self.current - 1]
    }

    /// Hand the diagnostic to the reporter and return the unwinding sentinel.
    fn error(&mut self, token: &Token<'_>, message: &str) -> LoxError {
        debug!(
            "Parse error at '{}' (line {}): {}",
            token.lexeme, token.line, message
        );

        self.reporter.report(token, message);

        LoxError::ParseAborted
    }
}

