//! Abstract syntax tree node definitions.
//!
//! Every node owns its children outright. Operator and literal nodes keep
//! the originating token so later passes still have line, column and span
//! information for diagnostics.

use std::fmt;

use super::{BinaryOp, Token, UnaryOp};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `true`, `false`, `nil`, or an int/float/string literal token.
    Literal(Token),
    Unary {
        operator: Token,
        operand: Box<Expr>,
    },
    Binary {
        operator: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Parenthesised subexpression.
    Grouping(Box<Expr>),
}

impl Expr {
    pub fn unary(operator: Token, operand: Expr) -> Self {
        Expr::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn binary(operator: Token, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping(Box::new(inner))
    }

    pub fn unary_op(&self) -> Option<UnaryOp> {
        match self {
            Expr::Unary { operator, .. } => UnaryOp::from_kind(operator.kind),
            _ => None,
        }
    }

    pub fn binary_op(&self) -> Option<BinaryOp> {
        match self {
            Expr::Binary { operator, .. } => BinaryOp::from_kind(operator.kind),
            _ => None,
        }
    }
}

/// S-expression form, e.g. `(+ 1 (* 2 3))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(token) => write!(f, "{}", token),
            Expr::Unary { operator, operand } => match self.unary_op() {
                Some(op) => write!(f, "({} {})", op.symbol(), operand),
                None => write!(f, "({} {})", operator, operand),
            },
            Expr::Binary {
                operator,
                left,
                right,
            } => match self.binary_op() {
                Some(op) => write!(f, "({} {} {})", op.symbol(), left, right),
                None => write!(f, "({} {} {})", operator, left, right),
            },
            Expr::Grouping(inner) => write!(f, "(group {})", inner),
        }
    }
}
