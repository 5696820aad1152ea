//! Core crate entry point.
//!
//! This module wires together the token and AST definitions, the scanner
//! and expression parser, and the shared diagnostics for the Aspen front
//! end.
//!
//! ```
//! let tokens = aspen_core::scan_tokens("1 + 2 * 3").unwrap();
//! let expr = aspen_core::parse(&tokens).unwrap();
//! assert_eq!(expr.to_string(), "(+ 1 (* 2 3))");
//! ```

pub mod ast;
pub mod config;
pub mod diag;
pub mod parser;

pub use ast::{Expr, Literal, Token, TokenKind, TokenStream};
pub use config::{FrontendConfig, ParseConfig, ScanConfig};
pub use parser::lexer::{scan_tokens, LexError, LexErrorKind, ScanError, ScanOutput, Scanner};
pub use parser::{parse, parse_source, ParseError, ParseOutput, Parser, SyntaxError};
