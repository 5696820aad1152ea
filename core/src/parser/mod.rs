//! Aspen front-end utilities.
//!
//! This module exposes the scanner together with a hand-written
//! binding-power parser that turns a token stream into a single
//! expression tree under `crate::ast::nodes`. Lexical diagnostics
//! accumulate during the scan so callers can surface every lexical issue
//! in a single pass; the parser stops at the first syntax error of an
//! expression.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

pub mod lexer;

mod expressions;
mod support;

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::ast::{Expr, Token, TokenKind, TokenStream};
use crate::config::{FrontendConfig, ParseConfig};
use crate::diag::{render_all, ParseErrorCode, Reportable, Span};
use lexer::{LexError, Scanner};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parse one complete expression from `tokens`.
pub fn parse(tokens: &TokenStream) -> ParseResult<Expr> {
    parse_with_config(tokens, ParseConfig::default())
}

#[instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse_with_config(tokens: &TokenStream, config: ParseConfig) -> ParseResult<Expr> {
    let mut parser = Parser::with_config(tokens, config);

    let result = parser.parse_expression().and_then(|expr| {
        parser.finish()?;
        Ok(expr)
    });

    if let Err(err) = &result {
        debug!(code = ?err.code, offset = err.span.start, "parse error");
    }

    result
}

/// Scan and parse `source` in one go, keeping every diagnostic.
pub fn parse_source(source: &str) -> ParseOutput {
    parse_source_with_config(source, FrontendConfig::default())
}

pub fn parse_source_with_config(source: &str, config: FrontendConfig) -> ParseOutput {
    let scanned = Scanner::with_config(source, config.scan).scan_all();

    let mut errors: Vec<SyntaxError> = scanned.errors.into_iter().map(SyntaxError::from).collect();

    let expr = match parse_with_config(&scanned.tokens, config.parse) {
        Ok(expr) => Some(expr),
        Err(err) => {
            errors.push(SyntaxError::from(err));
            None
        }
    };

    ParseOutput {
        tokens: scanned.tokens,
        expr,
        errors,
    }
}

/// Result of [`parse_source`]: the recovered tokens, the expression if one
/// could be built, and every diagnostic in source order of discovery.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub tokens: TokenStream,
    pub expr: Option<Expr>,
    pub errors: Vec<SyntaxError>,
}

impl ParseOutput {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty() && self.expr.is_some()
    }

    /// Render all diagnostics against `source`.
    pub fn render(&self, source: &str) -> String {
        render_all(source, &self.errors)
    }
}

/// Syntax error emitted by the parser along with recovery hints.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(aspen::parse))]
pub struct ParseError {
    pub message: String,
    #[label("here")]
    pub span: Span,
    pub expected: Vec<String>,
    pub found: Option<TokenKind>,
    pub code: ParseErrorCode,
}

impl ParseError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: Vec::new(),
            found: None,
            code: ParseErrorCode::UnexpectedToken,
        }
    }

    fn with_code(mut self, code: ParseErrorCode) -> Self {
        self.code = code;
        self
    }

    fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected.push(expected.into());
        self
    }

    fn with_found(mut self, found: TokenKind) -> Self {
        self.found = Some(found);
        self
    }
}

impl Reportable for ParseError {
    fn span(&self) -> Span {
        self.span
    }
}

/// Either kind of front-end diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SyntaxError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

impl Reportable for SyntaxError {
    fn span(&self) -> Span {
        match self {
            SyntaxError::Lex(err) => err.span,
            SyntaxError::Parse(err) => err.span,
        }
    }
}

/// Cursor over a borrowed token stream. The stream is never copied or
/// modified; only the index moves, and never past the end marker.
pub struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
    config: ParseConfig,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenStream) -> Self {
        Self::with_config(tokens, ParseConfig::default())
    }

    pub fn with_config(tokens: &'a TokenStream, config: ParseConfig) -> Self {
        Self {
            tokens: tokens.tokens(),
            cursor: 0,
            config,
        }
    }

    /// Check that nothing but the end marker is left, unless trailing
    /// tokens are allowed.
    pub fn finish(&self) -> ParseResult<()> {
        if self.config.allow_trailing_tokens || self.is_eof() {
            return Ok(());
        }

        let token = self.peek();

        Err(ParseError::new(
            format!("unexpected {} after expression", describe(token)),
            token.span,
        )
        .with_expected("end of input")
        .with_found(token.kind))
    }
}

fn describe(token: &Token) -> String {
    match token.kind.spelling() {
        Some(text) if !token.is_eof() => format!("`{}`", text),
        _ => token.kind.describe().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use super::lexer::scan_tokens;

    fn parse_str(src: &str) -> ParseResult<Expr> {
        let tokens = scan_tokens(src).expect("scan failed");
        parse(&tokens)
    }

    #[test]
    fn parse_source_reports_clean_input() {
        let output = parse_source("1 + 2 * 3");

        assert!(output.is_ok(), "errors: {:?}", output.errors);
        assert_eq!(output.expr.expect("expression").to_string(), "(+ 1 (* 2 3))");
    }

    #[test]
    fn parse_source_collects_lexical_and_syntax_errors() {
        let output = parse_source("1 + @ # ");

        assert_eq!(output.errors.len(), 3);
        assert!(matches!(output.errors[0], SyntaxError::Lex(_)));
        assert!(matches!(output.errors[1], SyntaxError::Lex(_)));
        match &output.errors[2] {
            SyntaxError::Parse(err) => {
                assert_eq!(err.code, ParseErrorCode::ExpectedExpression);
                assert_eq!(err.found, Some(TokenKind::Eof));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
        assert!(output.expr.is_none());
    }

    #[test]
    fn parse_source_keeps_tokens_after_lex_errors() {
        let output = parse_source("1 @ + 2");

        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.expr.expect("expression").to_string(), "(+ 1 2)");
        assert_eq!(output.tokens.len(), 4);
    }

    #[test]
    fn trailing_tokens_rejected_by_default() {
        let err = parse_str("1 2").expect_err("expected error");

        assert_eq!(err.code, ParseErrorCode::UnexpectedToken);
        assert_eq!(err.found, Some(TokenKind::Int));
        assert_eq!(err.span, Span::new(2, 3));
        assert_eq!(err.message, "unexpected integer literal after expression");
    }

    #[test]
    fn trailing_tokens_allowed_when_configured() {
        let tokens = scan_tokens("1 )").expect("scan failed");
        let config = ParseConfig::default().with_trailing_tokens(true);

        let expr = parse_with_config(&tokens, config).expect("parse failed");
        assert_eq!(expr.to_string(), "1");
    }

    #[test]
    fn configured_identifier_digits_reach_parser() {
        let config =
            FrontendConfig::default().with_scan(ScanConfig::default().with_identifier_digits(true));
        let output = parse_source_with_config("x1", config);

        match output.errors.as_slice() {
            [SyntaxError::Parse(err)] => {
                assert_eq!(err.code, ParseErrorCode::ExpectedExpression);
                assert_eq!(err.span, Span::new(0, 2));
            }
            other => panic!("unexpected diagnostics {:?}", other),
        }
    }

    #[test]
    fn render_includes_every_message() {
        let source = "(1 + @";
        let output = parse_source(source);
        let rendered = output.render(source);

        assert!(rendered.contains("unexpected character '@'"), "{}", rendered);
        assert!(rendered.contains("expected expression"), "{}", rendered);
    }
}
