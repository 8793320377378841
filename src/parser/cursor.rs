use std::rc::Rc;

use log::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

/// Forward-only, two-token window over a token source.
///
/// `current` is the token last consumed and `peek` the one after it. The
/// source is pulled exactly once per [`TokenCursor::advance`]. Once it yields
/// `EOF` (or runs dry) the cursor stops pulling and keeps handing out that
/// same `EOF` token.
pub struct TokenCursor<'a> {
    source: Box<dyn Iterator<Item = Token> + 'a>,
    current: Token,
    peek: Token,
    end: Option<Token>,
    last_position: Position,
}

impl<'a> TokenCursor<'a> {
    pub fn new<I>(source: I, file: Rc<String>) -> Self
    where
        I: IntoIterator<Item = Token>,
        I::IntoIter: 'a,
    {
        let start = Position(0, file);
        let mut cursor = TokenCursor {
            source: Box::new(source.into_iter()),
            current: Token::eof(start.clone()),
            peek: Token::eof(start.clone()),
            end: None,
            last_position: start,
        };

        cursor.advance();
        cursor.advance();
        cursor
    }

    fn pull(&mut self) -> Token {
        if let Some(end) = &self.end {
            return end.clone();
        }

        match self.source.next() {
            Some(token) if token.kind == TokenKind::EOF => {
                self.end = Some(token.clone());
                token
            }
            Some(token) => {
                trace!("pulled {}", token);
                self.last_position = token.span.end.clone();
                token
            }
            None => {
                let end = Token::eof(self.last_position.clone());
                self.end = Some(end.clone());
                end
            }
        }
    }

    /// Promotes `peek` into `current` and pulls a fresh `peek`.
    pub fn advance(&mut self) {
        let next = self.pull();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    pub fn peek(&self) -> &Token {
        &self.peek
    }

    pub fn current_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.peek.kind
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advances onto `peek` if it is of the expected kind.
    ///
    /// On a mismatch nothing moves and the returned error names both kinds.
    pub fn expect_peek(&mut self, kind: TokenKind) -> Result<Token, Error> {
        if self.peek_is(kind) {
            self.advance();
            return Ok(self.current.clone());
        }

        Err(Error::at_token(
            ErrorImpl::UnexpectedToken {
                expected: kind,
                actual: self.peek.kind,
                token: self.peek.value.clone(),
            },
            &self.peek,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::TokenCursor;
    use crate::lexer::{lexer::tokenize, tokens::{Token, TokenKind}};

    fn file() -> Rc<String> {
        Rc::new(String::from("test.mk"))
    }

    #[test]
    fn test_cursor_is_primed_with_two_tokens() {
        let cursor = TokenCursor::new(tokenize(String::from("let x"), None), file());

        assert_eq!(cursor.current_kind(), TokenKind::Let);
        assert_eq!(cursor.peek_kind(), TokenKind::Identifier);
        assert_eq!(cursor.peek().value, "x");
    }

    #[test]
    fn test_cursor_repeats_eof() {
        let mut cursor = TokenCursor::new(tokenize(String::from("x"), None), file());

        cursor.advance();
        assert!(cursor.current_is(TokenKind::EOF));
        assert!(cursor.peek_is(TokenKind::EOF));

        cursor.advance();
        cursor.advance();
        assert!(cursor.current_is(TokenKind::EOF));
        assert!(cursor.peek_is(TokenKind::EOF));
    }

    #[test]
    fn test_cursor_synthesizes_eof_for_a_source_that_runs_dry() {
        let tokens = vec![Token::new(TokenKind::Integer, "5")];
        let mut cursor = TokenCursor::new(tokens, file());

        assert!(cursor.current_is(TokenKind::Integer));
        assert!(cursor.peek_is(TokenKind::EOF));

        cursor.advance();
        assert!(cursor.current_is(TokenKind::EOF));

        let empty: Vec<Token> = Vec::new();
        let cursor = TokenCursor::new(empty, file());
        assert!(cursor.current_is(TokenKind::EOF));
        assert!(cursor.peek_is(TokenKind::EOF));
        assert_eq!(cursor.current().span.start.1.as_str(), "test.mk");
    }

    #[test]
    fn test_cursor_stops_pulling_after_eof() {
        let tokens = vec![
            Token::new(TokenKind::Identifier, "a"),
            Token::new(TokenKind::EOF, "EOF"),
            Token::new(TokenKind::Identifier, "ignored"),
        ];
        let mut cursor = TokenCursor::new(tokens, file());

        cursor.advance();
        cursor.advance();
        assert!(cursor.current_is(TokenKind::EOF));
        assert!(cursor.peek_is(TokenKind::EOF));
    }

    #[test]
    fn test_expect_peek() {
        let mut cursor = TokenCursor::new(tokenize(String::from("let x 5"), None), file());

        let name = cursor.expect_peek(TokenKind::Identifier).unwrap();
        assert_eq!(name.value, "x");
        assert!(cursor.current_is(TokenKind::Identifier));

        let error = cursor.expect_peek(TokenKind::Assignment).unwrap_err();
        assert_eq!(error.message(), "expected next token to be =, got INT instead");
        assert_eq!(error.get_position().0, 6);
        // A failed expectation does not move the cursor.
        assert!(cursor.current_is(TokenKind::Identifier));
        assert!(cursor.peek_is(TokenKind::Integer));
    }
}
