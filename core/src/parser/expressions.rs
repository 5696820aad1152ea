use super::*;

const PREFIX_OPERATORS: [TokenKind; 2] = [TokenKind::Bang, TokenKind::Minus];

const LITERAL_KINDS: [TokenKind; 6] = [
    TokenKind::KwFalse,
    TokenKind::KwTrue,
    TokenKind::KwNil,
    TokenKind::Int,
    TokenKind::Float,
    TokenKind::Str,
];

/// An operator or open grouping still waiting for its right-hand side.
enum Pending {
    Prefix(Token),
    Infix {
        operator: Token,
        right_bp: u8,
        left: Expr,
    },
    Group,
}

impl<'a> Parser<'a> {
    /// Parse one expression starting at the cursor. Tokens after it are
    /// left in place.
    ///
    /// Operators and open groupings wait on an explicit stack instead of
    /// the call stack, so neither prefix chains nor nested groupings
    /// recurse. Only groupings count against `max_depth`.
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        let mut pending: Vec<Pending> = Vec::new();
        let mut groups = 0usize;

        loop {
            while let Some(operator) = self.matches(&PREFIX_OPERATORS) {
                pending.push(Pending::Prefix(operator));
            }

            if let Some(open) = self.matches(&[TokenKind::LParen]) {
                if groups >= self.config.max_depth {
                    return Err(ParseError::new(
                        format!("expression nests deeper than {} levels", self.config.max_depth),
                        open.span,
                    )
                    .with_code(ParseErrorCode::NestingTooDeep));
                }

                groups += 1;
                pending.push(Pending::Group);
                continue;
            }

            let mut expr = self.parse_primary()?;

            loop {
                if let Some((left_bp, right_bp)) = infix_binding_power(self.peek().kind) {
                    let left = reduce(&mut pending, expr, left_bp);
                    let operator = self.advance();

                    pending.push(Pending::Infix {
                        operator,
                        right_bp,
                        left,
                    });
                    break;
                }

                expr = reduce(&mut pending, expr, 0);

                if !matches!(pending.last(), Some(Pending::Group)) {
                    return Ok(expr);
                }

                self.expect_token(
                    TokenKind::RParen,
                    "`)` to close grouping",
                    ParseErrorCode::ExpectedClosingParen,
                )?;

                pending.pop();
                groups -= 1;
                expr = Expr::grouping(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        if let Some(token) = self.matches(&LITERAL_KINDS) {
            return Ok(Expr::Literal(token));
        }

        let found = self.peek();

        Err(ParseError::new("expected expression", found.span)
            .with_expected("literal or `(`")
            .with_found(found.kind)
            .with_code(ParseErrorCode::ExpectedExpression))
    }
}

/// Fold waiting operators into `expr` while they bind tighter than an
/// operator with binding power `min_bp`. Stops at an open grouping.
fn reduce(pending: &mut Vec<Pending>, mut expr: Expr, min_bp: u8) -> Expr {
    loop {
        match pending.pop() {
            Some(Pending::Prefix(operator)) => expr = Expr::unary(operator, expr),
            Some(Pending::Infix {
                operator,
                right_bp,
                left,
            }) if right_bp > min_bp => expr = Expr::binary(operator, left, expr),
            Some(other) => {
                pending.push(other);
                return expr;
            }
            None => return expr,
        }
    }
}

/// Left and right binding power of a binary operator. Every level is
/// left-associative.
fn infix_binding_power(kind: TokenKind) -> Option<(u8, u8)> {
    let prec = match kind {
        TokenKind::PipePipe => PREC_OR,
        TokenKind::AmpAmp => PREC_AND,
        TokenKind::EqEq | TokenKind::BangEq => PREC_EQUALITY,
        TokenKind::Gt | TokenKind::GtEq | TokenKind::Lt | TokenKind::LtEq => PREC_COMPARISON,
        TokenKind::Pipe => PREC_BIT_OR,
        TokenKind::Caret => PREC_BIT_XOR,
        TokenKind::Amp => PREC_BIT_AND,
        TokenKind::Plus | TokenKind::Minus => PREC_SUM,
        TokenKind::Star | TokenKind::Slash => PREC_PRODUCT,
        _ => return None,
    };

    Some((prec, prec + 1))
}

const PREC_PRODUCT: u8 = 90;
const PREC_SUM: u8 = 80;
const PREC_BIT_AND: u8 = 70;
const PREC_BIT_XOR: u8 = 60;
const PREC_BIT_OR: u8 = 50;
const PREC_COMPARISON: u8 = 40;
const PREC_EQUALITY: u8 = 30;
const PREC_AND: u8 = 20;
const PREC_OR: u8 = 10;
