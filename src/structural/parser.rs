//! Structural parser
//!
//! Builds a [`ReferenceGraph`]: the scheduled blocks of a routine with only
//! the `@node`/`@sig` markers of each body kept. Everything else inside a
//! body, including `<`, `>`, identifiers and lone dashes, is absorbed until
//! a close delimiter appears.

use crate::ast::{Reference, ReferenceGraph, ReferenceKind};
use crate::block::{self, BlockGrammar, CloseAhead};
use crate::cursor::TokenCursor;
use crate::error::{RoutineError, SyntaxError};
use crate::structural::lexer::{tokenize, StructuralKind};

/// Reference collector over the structural token set
pub struct StructuralParser<'src> {
    cursor: TokenCursor<'src, StructuralKind>,
}

impl<'src> StructuralParser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: TokenCursor::new(source, tokenize(source)),
        }
    }

    pub fn parse_routine(&mut self) -> Result<ReferenceGraph, SyntaxError> {
        block::parse_routine(self)
    }

    pub fn parse_routine_recovering(&mut self) -> (ReferenceGraph, Vec<SyntaxError>) {
        block::parse_routine_recovering(self)
    }
}

impl<'src> BlockGrammar<'src> for StructuralParser<'src> {
    type Kind = StructuralKind;
    type Body = Vec<Reference>;

    fn cursor(&mut self) -> &mut TokenCursor<'src, StructuralKind> {
        &mut self.cursor
    }

    fn parse_body(&mut self) -> Result<Vec<Reference>, SyntaxError> {
        let mut references = Vec::new();

        // End of input is left for the close delimiter to report.
        while !self.cursor.is_at_end() && block::close_ahead(&self.cursor) == CloseAhead::No {
            let token = self.cursor.advance();
            let kind = match token.kind {
                StructuralKind::Node => ReferenceKind::Node,
                StructuralKind::Signal => ReferenceKind::Signal,
                _ => continue,
            };
            references.push(Reference {
                kind,
                span: token.span,
            });
        }

        Ok(references)
    }
}

/// Parse `source` into its reference graph, stopping at the first error.
pub fn parse(source: &str) -> Result<ReferenceGraph, SyntaxError> {
    StructuralParser::new(source).parse_routine()
}

/// Parse `source`, skipping malformed scheduled blocks and collecting one
/// error for each.
pub fn parse_recovering(source: &str) -> (ReferenceGraph, Vec<RoutineError>) {
    let (routine, errors) = StructuralParser::new(source).parse_routine_recovering();
    (routine, errors.into_iter().map(RoutineError::from).collect())
}
