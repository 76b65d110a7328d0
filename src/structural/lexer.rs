//! Structural lexer
//!
//! Recognises only what the reference graph needs: the `@node`/`@sig`
//! markers, the block delimiters and flag-list punctuation, and identifiers.
//! Everything else becomes a [`StructuralKind::Noise`] token, so this lexer
//! cannot fail on embedded host-language code.

use crate::source::Span;
use crate::token::{Delimiter, Token, TokenKind};
use logos::{FilterResult, Logos};
use tracing::trace;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\r\n]*")]
pub enum StructuralKind {
    #[token("@node")]
    Node,

    #[token("@sig")]
    Signal,

    #[token(">")]
    Gt,

    #[token("<")]
    Lt,

    #[token("-")]
    Dash,

    #[token(",")]
    Comma,

    #[token("@")]
    At,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    /// Any single unrecognised character, or a run of two or more dashes
    /// (`--`, the `--` of `-->`), which must never read as a close delimiter.
    /// A closed block comment is skipped; an unclosed `/*` is two noise
    /// characters.
    #[regex(r"--+")]
    #[regex(r".", priority = 0)]
    #[token("/*", skip_block_comment)]
    Noise,

    Eof,
}

impl TokenKind for StructuralKind {
    const EOF: Self = StructuralKind::Eof;

    fn delimiter(self) -> Delimiter {
        match self {
            StructuralKind::Lt => Delimiter::Lt,
            StructuralKind::Gt => Delimiter::Gt,
            StructuralKind::Dash => Delimiter::Dash,
            StructuralKind::Comma => Delimiter::Comma,
            StructuralKind::Identifier => Delimiter::Identifier,
            StructuralKind::Eof => Delimiter::Eof,
            StructuralKind::Node
            | StructuralKind::Signal
            | StructuralKind::At
            | StructuralKind::Noise => Delimiter::Other,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            StructuralKind::Node => "'@node'",
            StructuralKind::Signal => "'@sig'",
            StructuralKind::Gt => "'>'",
            StructuralKind::Lt => "'<'",
            StructuralKind::Dash => "'-'",
            StructuralKind::Comma => "','",
            StructuralKind::At => "'@'",
            StructuralKind::Identifier => "identifier",
            StructuralKind::Noise => "noise",
            StructuralKind::Eof => "end of input",
        }
    }
}

fn skip_block_comment(lex: &mut logos::Lexer<StructuralKind>) -> FilterResult<(), ()> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => FilterResult::Error(()),
    }
}

/// Tokenize `source`, ending with an [`StructuralKind::Eof`] token.
///
/// Never fails: every character is either skipped, part of a recognised
/// token, or consumed as noise.
pub fn tokenize(source: &str) -> Vec<Token<'_, StructuralKind>> {
    let mut lexer = StructuralKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span: Span = lexer.span().into();
        match result {
            Ok(kind) => tokens.push(Token::new(kind, lexer.slice(), span)),
            // Lexing resumes after the rejected slice; each of its
            // characters is noise.
            Err(()) => {
                for (offset, ch) in lexer.slice().char_indices() {
                    let start = span.start + offset;
                    let end = start + ch.len_utf8();
                    tokens.push(Token::new(
                        StructuralKind::Noise,
                        &source[start..end],
                        Span::new(start, end),
                    ));
                }
            }
        }
    }
    tokens.push(Token::eof(source.len()));

    trace!(tokens = tokens.len(), "structural tokenize");
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<StructuralKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_delimiters_and_flags() {
        use StructuralKind::*;
        assert_eq!(
            kinds("<a,b- -c>"),
            vec![Lt, Identifier, Comma, Identifier, Dash, Dash, Identifier, Gt, Eof]
        );
    }

    #[test]
    fn test_markers() {
        use StructuralKind::*;
        assert_eq!(kinds("@node @sig @ @nodes"), vec![Node, Signal, At, Node, Identifier, Eof]);
    }

    #[test]
    fn test_noise_is_single_characters() {
        let tokens = tokenize("(!)");
        assert_eq!(tokens.len(), 4);
        assert!(tokens[..3].iter().all(|t| t.kind == StructuralKind::Noise));
        assert_eq!(tokens[1].text, "!");
        assert_eq!(tokens[1].span, Span::new(1, 2));
    }

    #[test]
    fn test_dash_runs_are_noise() {
        use StructuralKind::*;
        assert_eq!(kinds("--> -"), vec![Noise, Gt, Dash, Eof]);
        assert_eq!(tokenize("---")[0].text, "---");
    }

    #[test]
    fn test_comments_and_whitespace_are_skipped() {
        use StructuralKind::*;
        assert_eq!(
            kinds("a // @node\n/* @sig\n */ b"),
            vec![Identifier, Identifier, Eof]
        );
    }

    #[test]
    fn test_non_ascii_is_noise() {
        let tokens = tokenize("é@sig");
        assert_eq!(tokens[0].kind, StructuralKind::Noise);
        assert_eq!(tokens[0].text, "é");
        assert_eq!(tokens[1].kind, StructuralKind::Signal);
    }

    #[test]
    fn test_unterminated_block_comment_is_noise() {
        use StructuralKind::*;
        let tokens = tokenize("/* @node");
        assert_eq!(tokens[0].text, "/");
        assert_eq!(tokens[1].text, "*");
        assert_eq!(tokens[1].span, Span::new(1, 2));
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![Noise, Noise, Node, Eof]);
    }

    #[test]
    fn test_block_comment_edges() {
        use StructuralKind::*;
        assert_eq!(kinds("a/**/b"), vec![Identifier, Identifier, Eof]);
        assert_eq!(kinds("/* @node ** */ @sig"), vec![Signal, Eof]);
        assert_eq!(kinds("/* - */ - /* > */ >"), vec![Dash, Gt, Eof]);
    }

    #[test]
    fn test_eof_positioned_at_end() {
        let tokens = tokenize("ab  ");
        let eof = tokens.last().unwrap();
        assert!(eof.is_eof());
        assert_eq!(eof.span, Span::new(4, 4));
    }
}
