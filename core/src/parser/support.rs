use super::*;

impl<'a> Parser<'a> {
    /// Consume the current token if it has kind `kind`, otherwise report
    /// what was expected.
    pub(super) fn expect_token(
        &mut self,
        kind: TokenKind,
        expected: &str,
        code: ParseErrorCode,
    ) -> ParseResult<Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }

        let found = self.peek();

        Err(
            ParseError::new(format!("expected {}", expected), found.span)
                .with_expected(expected.to_owned())
                .with_found(found.kind)
                .with_code(code),
        )
    }

    /// Consume and return the current token if its kind is one of `kinds`.
    pub(super) fn matches(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if !kinds.iter().any(|kind| self.check(*kind)) {
            return None;
        }

        self.advance();
        Some(self.previous().clone())
    }

    pub(super) fn check(&self, kind: TokenKind) -> bool {
        !self.is_eof() && self.peek().kind == kind
    }

    /// Step past the current token and return it. At the end marker the
    /// cursor stays put.
    pub(super) fn advance(&mut self) -> Token {
        if !self.is_eof() {
            self.cursor += 1;
            return self.previous().clone();
        }

        self.peek().clone()
    }

    pub(super) fn peek(&self) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        &tokens[self.cursor.min(tokens.len() - 1)]
    }

    /// The most recently consumed token, or the first token before
    /// anything has been consumed.
    pub(super) fn previous(&self) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        &tokens[self.cursor.saturating_sub(1).min(tokens.len() - 1)]
    }

    pub(super) fn is_eof(&self) -> bool {
        self.peek().is_eof()
    }
}
