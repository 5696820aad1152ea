//! Diagnostic utilities shared across the core crate.
//!
//! This module centralises source spans, parser error codes, and the
//! source-context formatter so the scanner and parser agree on a common
//! representation.

pub mod render;
pub mod span;

pub use render::{render, render_all, Reportable};
pub use span::Span;

/// Parser-specific diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorCode {
    UnexpectedToken,
    ExpectedExpression,
    ExpectedClosingParen,
    NestingTooDeep,
}
