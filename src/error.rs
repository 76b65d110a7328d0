//! Error types for both front ends
//!
//! Every error carries a resolved [`SourceLocation`]. Nothing here is logged;
//! presenting diagnostics is left to the caller.

use crate::source::SourceLocation;
use thiserror::Error;

/// Fatal lexing failure. Only the full lexer produces these; the structural
/// lexer turns anything it does not recognise into a noise token instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexicalError {
    #[error("Lexical error at {location}: unexpected character '{character}'")]
    UnexpectedCharacter {
        character: char,
        location: SourceLocation,
    },

    #[error("Lexical error at {location}: unterminated block comment")]
    UnterminatedComment { location: SourceLocation },
}

impl LexicalError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexicalError::UnexpectedCharacter { location, .. }
            | LexicalError::UnterminatedComment { location } => *location,
        }
    }
}

/// Grammar violation in either pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Syntax error at {location}: expected {expected}, found {found}")]
    Unexpected {
        expected: String,
        found: String,
        location: SourceLocation,
    },

    /// End of input was reached while a construct still expected tokens.
    #[error("Syntax error at {location}: unexpected end of input, expected {expected}")]
    IncompleteInput {
        expected: String,
        location: SourceLocation,
    },
}

impl SyntaxError {
    pub fn location(&self) -> SourceLocation {
        match self {
            SyntaxError::Unexpected { location, .. }
            | SyntaxError::IncompleteInput { location, .. } => *location,
        }
    }

    pub fn expected(&self) -> &str {
        match self {
            SyntaxError::Unexpected { expected, .. }
            | SyntaxError::IncompleteInput { expected, .. } => expected,
        }
    }

    pub fn is_incomplete_input(&self) -> bool {
        matches!(self, SyntaxError::IncompleteInput { .. })
    }
}

/// Any failure produced while turning routine source into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutineError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl RoutineError {
    pub fn location(&self) -> SourceLocation {
        match self {
            RoutineError::Lexical(err) => err.location(),
            RoutineError::Syntax(err) => err.location(),
        }
    }
}
