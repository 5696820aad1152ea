//! Aspen abstract syntax tree and token types.
//!
//! The submodules organise lexical tokens, operator enums, and the
//! expression nodes produced by the parser. Re-exports at this level give
//! downstream crates a convenient single import path.

pub mod nodes;
pub mod ops;
pub mod tokens;

pub use nodes::Expr;
pub use ops::{BinaryOp, UnaryOp};
pub use tokens::{keyword, Literal, Token, TokenKind, TokenStream};
