//! Token representation shared by both lexers
//!
//! The structural and full lexers have different vocabularies, but both
//! produce the same [`Token`] shape and both vocabularies classify their
//! kinds through [`TokenKind::delimiter`], which is all the scheduled-block
//! recogniser in [`crate::block`] needs to know about them.

use crate::source::Span;
use std::fmt;

/// Role a token kind plays in the scheduled-block delimiter syntax
/// `'<' flags? '-' … '-' flags? '>'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Lt,
    Gt,
    Dash,
    Comma,
    Identifier,
    Eof,
    Other,
}

/// Implemented by each lexer's kind enum.
pub trait TokenKind: Copy + Eq + fmt::Debug {
    /// The end-of-input kind appended by the lexer.
    const EOF: Self;

    fn delimiter(self) -> Delimiter;

    /// Category name used in "expected ..." diagnostics.
    fn describe(self) -> &'static str;
}

/// A lexeme borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src, K> {
    pub kind: K,
    pub text: &'src str,
    pub span: Span,
}

impl<'src, K: TokenKind> Token<'src, K> {
    pub fn new(kind: K, text: &'src str, span: Span) -> Self {
        Self { kind, text, span }
    }

    /// Zero-width end-of-input marker positioned at `offset`.
    pub fn eof(offset: usize) -> Self {
        Self::new(K::EOF, "", Span::new(offset, offset))
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn is_eof(&self) -> bool {
        self.kind == K::EOF
    }

    /// Rendering of the token for "found ..." in diagnostics.
    pub fn found(&self) -> String {
        if self.is_eof() {
            "end of input".to_string()
        } else {
            format!("'{}'", self.text)
        }
    }
}
