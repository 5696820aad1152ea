//! Token definitions for Aspen's scanner.
//!
//! This module enumerates every lexical category emitted by the scanner,
//! the literal payloads a token may carry, and the textual rendering used
//! when dumping a token stream for debugging.

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;

use once_cell::sync::Lazy;

use crate::diag::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // single character tokens
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,
    Caret,

    // one or two character tokens
    Bang,
    BangEq,
    Assign,
    EqEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
    Amp,
    AmpAmp,
    Pipe,
    PipePipe,

    // literals
    Ident,
    Str,
    Float,
    Int,

    // keywords
    KwElse,
    KwFor,
    KwFn,
    KwIf,
    KwNil,
    KwPrint,
    KwReturn,
    KwTrue,
    KwFalse,
    KwLet,
    KwWhile,

    Eof,
}

impl TokenKind {
    /// Fixed spelling for punctuation, operators, keywords and the end
    /// marker. Literal kinds have no fixed spelling.
    pub fn spelling(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Minus => "-",
            TokenKind::Plus => "+",
            TokenKind::Semicolon => ";",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Caret => "^",
            TokenKind::Bang => "!",
            TokenKind::BangEq => "!=",
            TokenKind::Assign => "=",
            TokenKind::EqEq => "==",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Amp => "&",
            TokenKind::AmpAmp => "&&",
            TokenKind::Pipe => "|",
            TokenKind::PipePipe => "||",
            TokenKind::KwElse => "else",
            TokenKind::KwFor => "for",
            TokenKind::KwFn => "fn",
            TokenKind::KwIf => "if",
            TokenKind::KwNil => "nil",
            TokenKind::KwPrint => "print",
            TokenKind::KwReturn => "return",
            TokenKind::KwTrue => "true",
            TokenKind::KwFalse => "false",
            TokenKind::KwLet => "let",
            TokenKind::KwWhile => "while",
            TokenKind::Eof => "<eof>",
            TokenKind::Ident | TokenKind::Str | TokenKind::Float | TokenKind::Int => {
                return None;
            }
        };

        Some(text)
    }

    /// Human-readable name used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Str => "string literal",
            TokenKind::Float => "float literal",
            TokenKind::Int => "integer literal",
            TokenKind::Eof => "end of input",
            other => other.spelling().unwrap_or("token"),
        }
    }
}

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    HashMap::from([
        ("else", TokenKind::KwElse),
        ("for", TokenKind::KwFor),
        ("fn", TokenKind::KwFn),
        ("if", TokenKind::KwIf),
        ("nil", TokenKind::KwNil),
        ("print", TokenKind::KwPrint),
        ("return", TokenKind::KwReturn),
        ("true", TokenKind::KwTrue),
        ("false", TokenKind::KwFalse),
        ("let", TokenKind::KwLet),
        ("while", TokenKind::KwWhile),
    ])
});

/// Look up a reserved word.
pub fn keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS.get(text).copied()
}

/// Literal payload carried by identifier, string and numeric tokens.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Literal {
    #[default]
    Absent,
    Ident(String),
    /// Raw characters between the quotes, no escape processing.
    Str(String),
    Int(i64),
    Float(f64),
}

/// A token with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: Literal,
    pub line: u32,
    pub column: u32,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, line: u32, column: u32, span: Span) -> Self {
        Self {
            kind,
            literal: Literal::Absent,
            line,
            column,
            span,
        }
    }

    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = literal;
        self
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.literal, self.kind) {
            (Literal::Ident(name), _) => f.write_str(name),
            (Literal::Str(text), _) => write!(f, "\"{}\"", text),
            (Literal::Int(value), _) => write!(f, "{}", value),
            (Literal::Float(value), _) => write!(f, "{:.2}", value),
            (Literal::Absent, kind) => f.write_str(kind.spelling().unwrap_or("?")),
        }
    }
}

/// Scanner output: an ordered token sequence ending in exactly one
/// [`TokenKind::Eof`].
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Wrap `tokens`, appending an end marker at `eof` and dropping any
    /// stray end markers so the stream invariant holds.
    pub(crate) fn new(mut tokens: Vec<Token>, eof: Token) -> Self {
        tokens.retain(|token| !token.is_eof());
        tokens.push(eof);
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|token| token.kind).collect()
    }
}

impl Deref for TokenStream {
    type Target = [Token];

    fn deref(&self) -> &[Token] {
        &self.tokens
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut last_line = None;

        for (idx, token) in self.tokens.iter().enumerate() {
            if last_line != Some(token.line) {
                write!(f, "{:4} ", token.line)?;
                last_line = Some(token.line);
            } else {
                f.write_str("   | ")?;
            }

            write!(f, "{:2} {}", token.column, token)?;

            if idx + 1 != self.tokens.len() {
                f.write_str("\n")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind, line: u32, column: u32) -> Token {
        Token::new(kind, line, column, Span::new(0, 0))
    }

    #[test]
    fn keyword_lookup() {
        assert_eq!(keyword("while"), Some(TokenKind::KwWhile));
        assert_eq!(keyword("nil"), Some(TokenKind::KwNil));
        assert_eq!(keyword("While"), None);
        assert_eq!(keyword("x"), None);
    }

    #[test]
    fn token_display_forms() {
        let string = tok(TokenKind::Str, 1, 1).with_literal(Literal::Str("hi".into()));
        let float = tok(TokenKind::Float, 1, 1).with_literal(Literal::Float(2.5));
        let int = tok(TokenKind::Int, 1, 1).with_literal(Literal::Int(-7));
        let ident = tok(TokenKind::Ident, 1, 1).with_literal(Literal::Ident("abc".into()));

        assert_eq!(string.to_string(), "\"hi\"");
        assert_eq!(float.to_string(), "2.50");
        assert_eq!(int.to_string(), "-7");
        assert_eq!(ident.to_string(), "abc");
        assert_eq!(tok(TokenKind::PipePipe, 1, 1).to_string(), "||");
        assert_eq!(tok(TokenKind::KwReturn, 1, 1).to_string(), "return");
        assert_eq!(tok(TokenKind::Eof, 1, 1).to_string(), "<eof>");
    }

    #[test]
    fn stream_listing_groups_lines() {
        let stream = TokenStream::new(
            vec![
                tok(TokenKind::KwLet, 1, 1),
                tok(TokenKind::Assign, 1, 7),
                tok(TokenKind::Int, 2, 3).with_literal(Literal::Int(12)),
            ],
            tok(TokenKind::Eof, 2, 5),
        );

        assert_eq!(
            stream.to_string(),
            "   1  1 let\n   |  7 =\n   2  3 12\n   |  5 <eof>"
        );
    }

    #[test]
    fn stream_keeps_single_end_marker() {
        let stream = TokenStream::new(
            vec![tok(TokenKind::Eof, 1, 1), tok(TokenKind::Plus, 1, 2)],
            tok(TokenKind::Eof, 1, 3),
        );

        assert_eq!(stream.kinds(), vec![TokenKind::Plus, TokenKind::Eof]);
        assert_eq!(stream.last().map(|token| token.column), Some(3));
    }
}
