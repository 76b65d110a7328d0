//! Full parser coordinator
//!
//! Provides the [`Parser`] struct and the public entry points of the full
//! pipeline. Grammar rules are split across `impl Parser` blocks:
//! - `statements`: scheduled-block bodies and statements
//! - `expressions`: precedence climbing, prefix, primary and postfix forms
//! - `types`: primitive, named, generic and array types
//!
//! Scheduled-block delimiters and flag lists come from [`crate::block`].

use crate::ast::{Expression, Program, Statement};
use crate::block::{self, BlockGrammar};
use crate::cursor::TokenCursor;
use crate::error::{LexicalError, RoutineError, SyntaxError};
use crate::full::lexer::{tokenize, tokenize_collecting, FullKind};
use crate::source::Span;
use crate::token::Token;
use tracing::debug;

/// Recursive-descent parser over the full token set
pub struct Parser<'src> {
    pub(crate) cursor: TokenCursor<'src, FullKind>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Result<Self, LexicalError> {
        Ok(Self::from_tokens(source, tokenize(source)?))
    }

    pub fn from_tokens(source: &'src str, tokens: Vec<Token<'src, FullKind>>) -> Self {
        Self {
            cursor: TokenCursor::new(source, tokens),
        }
    }

    pub fn parse_routine(&mut self) -> Result<Program, SyntaxError> {
        block::parse_routine(self)
    }

    pub fn parse_routine_recovering(&mut self) -> (Program, Vec<SyntaxError>) {
        block::parse_routine_recovering(self)
    }

    /// Parse the whole input as one expression.
    pub fn parse_condition(&mut self) -> Result<Expression, SyntaxError> {
        let expr = self.parse_expression()?;
        if !self.cursor.is_at_end() {
            return Err(self.cursor.error_expected("end of input"));
        }
        Ok(expr)
    }

    /// Span from `start` to the end of the last consumed token.
    pub(crate) fn span_from(&self, start: usize) -> Span {
        let end = self
            .cursor
            .previous()
            .map_or(start, |token| token.end().max(start));
        Span::new(start, end)
    }

    pub(crate) fn start(&self) -> usize {
        self.cursor.peek().start()
    }
}

impl<'src> BlockGrammar<'src> for Parser<'src> {
    type Kind = FullKind;
    type Body = Vec<Statement>;

    fn cursor(&mut self) -> &mut TokenCursor<'src, FullKind> {
        &mut self.cursor
    }

    fn parse_body(&mut self) -> Result<Vec<Statement>, SyntaxError> {
        self.parse_block_body()
    }
}

/// Parse `source` as a routine, stopping at the first error.
pub fn parse(source: &str) -> Result<Program, RoutineError> {
    Ok(Parser::new(source)?.parse_routine()?)
}

/// Parse `source` as a routine, collecting every lexical error and one
/// syntax error per malformed scheduled block. Errors are ordered by
/// position.
///
/// A block containing a lexical error is left out of the program, even
/// when the tokens around the bad character still parse.
pub fn parse_recovering(source: &str) -> (Program, Vec<RoutineError>) {
    let (tokens, lexical) = tokenize_collecting(source);
    let (mut program, syntax) = Parser::from_tokens(source, tokens).parse_routine_recovering();

    program.blocks.retain(|block| {
        let damaged = lexical
            .iter()
            .any(|err| (block.span.start..block.span.end).contains(&err.location().offset));
        if damaged {
            debug!(start = block.span.start, "dropping block with lexical errors");
        }
        !damaged
    });

    let mut errors: Vec<RoutineError> = lexical
        .into_iter()
        .map(RoutineError::from)
        .chain(syntax.into_iter().map(RoutineError::from))
        .collect();
    errors.sort_by_key(|err| err.location().offset);

    if !errors.is_empty() {
        debug!(errors = errors.len(), "full parse finished with errors");
    }
    (program, errors)
}

/// Parse `source` as a condition: a single expression and nothing else.
pub fn parse_condition(source: &str) -> Result<Expression, RoutineError> {
    Ok(Parser::new(source)?.parse_condition()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_routine() {
        assert!(parse("").unwrap().blocks.is_empty());
        assert!(parse("  // nothing\n").unwrap().blocks.is_empty());
    }

    #[test]
    fn test_empty_scheduled_block() {
        let program = parse("<- ->").unwrap();
        assert_eq!(program.blocks.len(), 1);
        assert!(program.blocks[0].body.is_empty());
    }

    #[test]
    fn test_lexical_error_surfaces() {
        let err = parse("<- x = $; ->").unwrap_err();
        assert!(matches!(err, RoutineError::Lexical(_)));
    }

    #[test]
    fn test_condition() {
        let expr = parse_condition("a && !b").unwrap();
        assert_eq!(expr.to_string(), "(&& a (! b))");
    }

    #[test]
    fn test_condition_rejects_trailing_tokens() {
        let err = parse_condition("a b").unwrap_err();
        match err {
            RoutineError::Syntax(err) => {
                assert_eq!(err.expected(), "end of input");
                assert_eq!(err.location().column, 3);
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_recovering_orders_errors() {
        // Missing `;` in the first block, a stray `#` in the second.
        let source = "<- x = 1 ->\n<- y = 2 #; ->\n<- z = 3; ->";
        let (program, errors) = parse_recovering(source);
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], RoutineError::Syntax(_)));
        assert_eq!(errors[0].location().line, 1);
        assert!(matches!(errors[1], RoutineError::Lexical(_)));
        assert_eq!(errors[1].location().line, 2);
        assert_eq!(program.blocks.len(), 1);
        assert_eq!(program.blocks[0].body[0].to_string(), "(= z 3);");
    }

    #[test]
    fn test_recovering_drops_block_with_bad_character() {
        let (program, errors) = parse_recovering("<- y = 2 #; ->");
        assert!(program.blocks.is_empty());
        assert_eq!(
            errors,
            vec![RoutineError::Lexical(LexicalError::UnexpectedCharacter {
                character: '#',
                location: crate::source::SourceLocation::new(9, 1, 10),
            })]
        );
    }

    #[test]
    fn test_recovering_keeps_blocks_around_bad_text() {
        let (program, errors) = parse_recovering("<a- x; -a> $ <b- y; -b>");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].location().offset, 11);
        let flags: Vec<_> = program.blocks.iter().map(|b| b.open_flags.clone()).collect();
        assert_eq!(flags, vec![vec!["a".to_string()], vec!["b".to_string()]]);
    }
}
