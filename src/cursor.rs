//! Token cursor shared by the structural and full parsers
//!
//! Owns the token buffer for one parse call and provides the lookahead,
//! matching and "expected X, found Y" helpers both grammars are written
//! against. The buffer always ends with an end-of-input token, and the
//! cursor never advances past it, so every lookahead is total.

use crate::error::SyntaxError;
use crate::source::{LineIndex, SourceLocation};
use crate::token::{Delimiter, Token, TokenKind};

pub struct TokenCursor<'src, K> {
    tokens: Vec<Token<'src, K>>,
    position: usize,
    lines: LineIndex<'src>,
}

impl<'src, K: TokenKind> TokenCursor<'src, K> {
    pub fn new(source: &'src str, mut tokens: Vec<Token<'src, K>>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            tokens.push(Token::eof(source.len()));
        }
        Self {
            tokens,
            position: 0,
            lines: LineIndex::new(source),
        }
    }

    pub fn peek(&self) -> Token<'src, K> {
        self.tokens[self.position]
    }

    pub fn peek_kind(&self) -> K {
        self.tokens[self.position].kind
    }

    /// Token `n` places ahead of the current one, clamped to end-of-input.
    pub fn peek_ahead(&self, n: usize) -> Token<'src, K> {
        let last = self.tokens.len() - 1;
        self.tokens[(self.position + n).min(last)]
    }

    pub fn previous(&self) -> Option<Token<'src, K>> {
        self.position
            .checked_sub(1)
            .map(|index| self.tokens[index])
    }

    pub fn advance(&mut self) -> Token<'src, K> {
        let token = self.peek();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    pub fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    pub fn check(&self, kind: K) -> bool {
        self.peek_kind() == kind
    }

    pub fn match_token(&mut self, kind: K) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn delimiter(&self) -> Delimiter {
        self.peek_kind().delimiter()
    }

    pub fn delimiter_ahead(&self, n: usize) -> Delimiter {
        self.peek_ahead(n).kind.delimiter()
    }

    /// Current position, for trial parses that may need to rewind.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn rewind(&mut self, position: usize) {
        self.position = position.min(self.tokens.len() - 1);
    }

    /// Whether the current token and the next one touch with no gap, as the
    /// two halves of a `<<` or `>>` shift operator must.
    pub fn next_is_adjacent(&self) -> bool {
        let next = self.peek_ahead(1);
        !next.is_eof() && next.start() == self.peek().end()
    }

    pub fn location(&self, offset: usize) -> SourceLocation {
        self.lines.location(offset)
    }

    /// Error describing the current token as not being `expected`.
    pub fn error_expected(&self, expected: impl Into<String>) -> SyntaxError {
        let token = self.peek();
        let location = self.location(token.start());
        if token.is_eof() {
            SyntaxError::IncompleteInput {
                expected: expected.into(),
                location,
            }
        } else {
            SyntaxError::Unexpected {
                expected: expected.into(),
                found: token.found(),
                location,
            }
        }
    }

    pub fn expect_token(&mut self, kind: K) -> Result<Token<'src, K>, SyntaxError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_expected(kind.describe()))
        }
    }

    pub fn expect_identifier(&mut self) -> Result<&'src str, SyntaxError> {
        if self.delimiter() == Delimiter::Identifier {
            Ok(self.advance().text)
        } else {
            Err(self.error_expected("identifier"))
        }
    }

    /// Skip forward to the next `<` that is followed by an identifier or
    /// `-`, i.e. the next plausible scheduled-block opener.
    pub fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.delimiter() == Delimiter::Lt
                && matches!(
                    self.delimiter_ahead(1),
                    Delimiter::Identifier | Delimiter::Dash
                )
            {
                return;
            }
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structural::lexer::{tokenize, StructuralKind};

    fn cursor(source: &str) -> TokenCursor<'_, StructuralKind> {
        TokenCursor::new(source, tokenize(source))
    }

    #[test]
    fn test_never_advances_past_end() {
        let mut cursor = cursor("a");
        assert_eq!(cursor.advance().text, "a");
        assert!(cursor.is_at_end());
        assert!(cursor.advance().is_eof());
        assert!(cursor.peek_ahead(5).is_eof());
        assert_eq!(cursor.previous().map(|t| t.text), Some("a"));
    }

    #[test]
    fn test_rewind() {
        let mut cursor = cursor("a b c");
        cursor.advance();
        let saved = cursor.position();
        cursor.advance();
        cursor.rewind(saved);
        assert_eq!(cursor.peek().text, "b");
    }

    #[test]
    fn test_error_at_end_is_incomplete_input() {
        let mut cursor = cursor("a");
        assert!(!cursor.error_expected("x").is_incomplete_input());
        cursor.advance();
        assert!(cursor.error_expected("x").is_incomplete_input());
    }

    #[test]
    fn test_synchronize_stops_at_block_opener() {
        let mut cursor = cursor("x < y <- z");
        cursor.synchronize();
        assert_eq!(cursor.delimiter(), Delimiter::Lt);
        assert_eq!(cursor.peek().start(), 2);

        cursor.advance();
        cursor.synchronize();
        assert_eq!(cursor.peek().start(), 6);
    }

    #[test]
    fn test_adjacency() {
        let tight = cursor("<< <");
        assert!(tight.next_is_adjacent());
        let mut spaced = cursor("< <");
        assert!(!spaced.next_is_adjacent());
        spaced.advance();
        assert!(!spaced.next_is_adjacent());
    }
}
