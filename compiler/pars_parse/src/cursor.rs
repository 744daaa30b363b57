//! Token cursor for navigating the token stream.

use pars_ir::Span;
use pars_lexer::{Token, TokenKind, TokenList};

/// Position in a token list. The last token is always `Eof`, and the
/// cursor never moves past it.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor {
            tokens: tokens.as_slice(),
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> Token {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .copied()
            .unwrap_or(Token::new(TokenKind::Eof, Span::DUMMY))
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span,
            None => Span::DUMMY,
        }
    }

    /// `Eof` at the start of the stream.
    pub fn previous_kind(&self) -> TokenKind {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.kind,
            None => TokenKind::Eof,
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consume the current token; stays put on `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    pub fn skip_newlines(&mut self) {
        while self.check(TokenKind::Newline) {
            self.advance();
        }
    }

    /// Kind of the first token at or after the cursor that is not a newline.
    pub fn next_significant_kind(&self) -> TokenKind {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .map(|token| token.kind)
            .find(|kind| *kind != TokenKind::Newline)
            .unwrap_or(TokenKind::Eof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pars_ir::StringInterner;
    use pretty_assertions::assert_eq;

    #[test]
    fn advance_stops_at_eof() {
        let interner = StringInterner::new();
        let lexed = pars_lexer::lex("a", &interner);
        let mut cursor = Cursor::new(&lexed.tokens);
        assert!(matches!(cursor.advance().kind, TokenKind::Ident(_)));
        assert_eq!(cursor.advance().kind, TokenKind::Eof);
        assert_eq!(cursor.advance().kind, TokenKind::Eof);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn lookahead_skips_newlines() {
        let interner = StringInterner::new();
        let lexed = pars_lexer::lex("\n\nelse", &interner);
        let mut cursor = Cursor::new(&lexed.tokens);
        assert_eq!(cursor.next_significant_kind(), TokenKind::Else);
        assert_eq!(cursor.current_kind(), TokenKind::Newline);
        cursor.skip_newlines();
        assert_eq!(cursor.current_kind(), TokenKind::Else);
        assert_eq!(cursor.previous_kind(), TokenKind::Newline);
    }
}
