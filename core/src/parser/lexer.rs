//! Source scanner for Aspen.
//!
//! Converts raw source text into a [`TokenStream`] whose tokens carry
//! 1-based line/column positions and byte spans. Scanning never stops at
//! the first problem: every lexical error is recorded and the scanner
//! resynchronises, so one pass can report all of them.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::ast::{keyword, Literal, Token, TokenKind, TokenStream};
use crate::config::ScanConfig;
use crate::diag::{render_all, Reportable, Span};

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A string literal reached a newline or the end of input.
    #[error("string literal not terminated")]
    UnterminatedString,

    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    /// Digit run that does not fit in a signed 64-bit integer.
    #[error("integer literal out of range")]
    IntegerOutOfRange,

    #[error("malformed numeric literal")]
    InvalidNumber,
}

/// A lexical error with the source location it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic(code(aspen::lex))]
pub struct LexError {
    pub kind: LexErrorKind,
    #[label("here")]
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Byte offset the error points at.
    pub fn offset(&self) -> usize {
        self.span.start
    }
}

impl Reportable for LexError {
    fn span(&self) -> Span {
        self.span
    }
}

/// Every lexical error from one scan, together with the source they refer
/// to so the whole set can be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub source: String,
    pub errors: Vec<LexError>,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_all(&self.source, &self.errors))
    }
}

impl std::error::Error for ScanError {}

/// Tokens recovered from a scan plus every diagnostic recorded on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutput {
    pub tokens: TokenStream,
    pub errors: Vec<LexError>,
}

impl ScanOutput {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// All-or-nothing view: the stream only when no error was recorded.
    pub fn into_result(self, source: &str) -> Result<TokenStream, ScanError> {
        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(ScanError {
                source: source.to_owned(),
                errors: self.errors,
            })
        }
    }
}

/// Scan `source`, discarding the token stream if any error was recorded.
pub fn scan_tokens(source: &str) -> Result<TokenStream, ScanError> {
    scan_tokens_with_config(source, ScanConfig::default())
}

pub fn scan_tokens_with_config(source: &str, config: ScanConfig) -> Result<TokenStream, ScanError> {
    Scanner::with_config(source, config)
        .scan_all()
        .into_result(source)
}

/// Position of the first character of a lexeme.
#[derive(Debug, Clone, Copy)]
struct Mark {
    offset: usize,
    line: u32,
    column: u32,
}

/// Single-pass scanner over a source string.
pub struct Scanner<'a> {
    source: &'a str,
    config: ScanConfig,
    cursor: usize,
    line: u32,
    column: u32,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, ScanConfig::default())
    }

    pub fn with_config(source: &'a str, config: ScanConfig) -> Self {
        Self {
            source,
            config,
            cursor: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Consume the whole source, keeping valid tokens alongside errors.
    #[instrument(level = "debug", skip_all, fields(bytes = self.source.len()))]
    pub fn scan_all(mut self) -> ScanOutput {
        while let Some(ch) = self.peek_char() {
            let start = self.mark();
            self.bump_char();

            match ch {
                ' ' | '\t' | '\r' | '\n' => {}
                '(' => self.push_token(TokenKind::LParen, start),
                ')' => self.push_token(TokenKind::RParen, start),
                '{' => self.push_token(TokenKind::LBrace, start),
                '}' => self.push_token(TokenKind::RBrace, start),
                ',' => self.push_token(TokenKind::Comma, start),
                '-' => self.push_token(TokenKind::Minus, start),
                '+' => self.push_token(TokenKind::Plus, start),
                ';' => self.push_token(TokenKind::Semicolon, start),
                '*' => self.push_token(TokenKind::Star, start),
                '^' => self.push_token(TokenKind::Caret, start),
                '/' => {
                    if self.eat('/') {
                        self.skip_line_comment();
                    } else {
                        self.push_token(TokenKind::Slash, start);
                    }
                }
                '!' => self.conditional_token(start, '=', TokenKind::BangEq, TokenKind::Bang),
                '=' => self.conditional_token(start, '=', TokenKind::EqEq, TokenKind::Assign),
                '>' => self.conditional_token(start, '=', TokenKind::GtEq, TokenKind::Gt),
                '<' => self.conditional_token(start, '=', TokenKind::LtEq, TokenKind::Lt),
                '&' => self.conditional_token(start, '&', TokenKind::AmpAmp, TokenKind::Amp),
                '|' => self.conditional_token(start, '|', TokenKind::PipePipe, TokenKind::Pipe),
                '"' => self.lex_string(start),
                c if c.is_ascii_digit() => self.lex_number(start),
                c if is_ident_start(c) => self.lex_identifier(start),
                other => self.push_error(
                    LexErrorKind::UnexpectedCharacter(other),
                    Span::single(start.offset, other.len_utf8()),
                ),
            }
        }

        let eof = Token::new(
            TokenKind::Eof,
            self.line,
            self.column,
            Span::new(self.cursor, self.cursor),
        );

        debug!(
            tokens = self.tokens.len() + 1,
            errors = self.errors.len(),
            "scan finished"
        );

        ScanOutput {
            tokens: TokenStream::new(self.tokens, eof),
            errors: self.errors,
        }
    }

    /// Emit `matched` when the next character is `expected`, otherwise
    /// `single`. The token keeps the column of its first character.
    fn conditional_token(
        &mut self,
        start: Mark,
        expected: char,
        matched: TokenKind,
        single: TokenKind,
    ) {
        if self.eat(expected) {
            self.push_token(matched, start);
        } else {
            self.push_token(single, start);
        }
    }

    /// Skip to the end of the line; the newline itself is consumed too.
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.bump_char() {
            if ch == '\n' {
                break;
            }
        }
    }

    fn lex_string(&mut self, start: Mark) {
        let content_start = self.cursor;

        while let Some(ch) = self.peek_char() {
            if ch == '"' || ch == '\n' {
                break;
            }
            self.bump_char();
        }

        let value = self.source[content_start..self.cursor].to_owned();

        if !self.eat('"') {
            let span = self.previous_char_span();
            self.push_error(LexErrorKind::UnterminatedString, span);
        }

        self.push_literal(TokenKind::Str, Literal::Str(value), start);
    }

    fn lex_number(&mut self, start: Mark) {
        self.consume_digits();

        let is_float = self.eat('.');
        if is_float {
            self.consume_digits();
        }

        let text = &self.source[start.offset..self.cursor];
        let span = Span::new(start.offset, self.cursor);

        let literal = if is_float {
            text.parse::<f64>()
                .map(Literal::Float)
                .map_err(|_| LexErrorKind::InvalidNumber)
        } else {
            text.parse::<i64>()
                .map(Literal::Int)
                .map_err(|_| LexErrorKind::IntegerOutOfRange)
        };

        match literal {
            Ok(literal) => {
                let kind = if is_float {
                    TokenKind::Float
                } else {
                    TokenKind::Int
                };
                self.push_literal(kind, literal, start);
            }
            Err(kind) => self.push_error(kind, span),
        }
    }

    fn lex_identifier(&mut self, start: Mark) {
        while let Some(ch) = self.peek_char() {
            if is_ident_start(ch) || (self.config.identifier_digits && ch.is_ascii_digit()) {
                self.bump_char();
            } else {
                break;
            }
        }

        let text = &self.source[start.offset..self.cursor];

        match keyword(text) {
            Some(kind) => self.push_token(kind, start),
            None => {
                let literal = Literal::Ident(text.to_owned());
                self.push_literal(TokenKind::Ident, literal, start);
            }
        }
    }

    fn consume_digits(&mut self) {
        while matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
            self.bump_char();
        }
    }

    fn push_token(&mut self, kind: TokenKind, start: Mark) {
        self.push_literal(kind, Literal::Absent, start);
    }

    fn push_literal(&mut self, kind: TokenKind, literal: Literal, start: Mark) {
        let token = Token::new(
            kind,
            start.line,
            start.column,
            Span::new(start.offset, self.cursor),
        )
        .with_literal(literal);

        trace!(?kind, line = token.line, column = token.column, "token");
        self.tokens.push(token);
    }

    fn push_error(&mut self, kind: LexErrorKind, span: Span) {
        debug!(offset = span.start, error = %kind, "lexical error");
        self.errors.push(LexError::new(kind, span));
    }

    fn mark(&self) -> Mark {
        Mark {
            offset: self.cursor,
            line: self.line,
            column: self.column,
        }
    }

    fn previous_char_span(&self) -> Span {
        match self.source[..self.cursor].chars().next_back() {
            Some(ch) => Span::single(self.cursor - ch.len_utf8(), ch.len_utf8()),
            None => Span::new(0, 0),
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.bump_char();
            true
        } else {
            false
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.cursor..].chars().next()
    }

    fn bump_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.cursor += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }
}

fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}
