//! Scheduled-block recognition shared by both pipelines
//!
//! ```text
//! routine         ::= scheduled_block* EOF
//! scheduled_block ::= open body close
//! open            ::= '<' flag_list? '-'
//! close           ::= '-' flag_list? '>'
//! flag_list       ::= IDENTIFIER (',' IDENTIFIER)*
//! ```
//!
//! The delimiters and flag lists are handled here once. What goes between
//! them is delegated to a [`BlockGrammar`]: the structural pass collects
//! markers, the full pass parses statements. Body parsers stop as soon as
//! [`close_ahead`] reports something other than [`CloseAhead::No`].

use crate::ast::{Routine, ScheduledBlock};
use crate::cursor::TokenCursor;
use crate::error::SyntaxError;
use crate::token::{Delimiter, TokenKind};
use tracing::{debug, trace};

/// A body grammar plugged into the shared delimiter handling.
pub trait BlockGrammar<'src> {
    type Kind: TokenKind;
    type Body;

    fn cursor(&mut self) -> &mut TokenCursor<'src, Self::Kind>;

    /// Parse everything between the open and close delimiters, leaving the
    /// cursor on the first token of the close delimiter.
    fn parse_body(&mut self) -> Result<Self::Body, SyntaxError>;
}

/// Outcome of looking for a close delimiter at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAhead {
    /// Not a close delimiter; the `-` (if any) belongs to the body.
    No,
    /// `'-' flag_list? '>'` starts here.
    Yes,
    /// `'-' … '>'` with a flag list that has a leading, trailing or doubled
    /// comma. Parsing the close reports the exact position.
    Malformed,
}

pub fn close_ahead<K: TokenKind>(cursor: &TokenCursor<'_, K>) -> CloseAhead {
    if cursor.delimiter() != Delimiter::Dash {
        return CloseAhead::No;
    }

    let mut n = 1;
    let mut well_formed = true;
    let mut expect_identifier = true;
    loop {
        match cursor.delimiter_ahead(n) {
            Delimiter::Gt => {
                // `->` alone is fine; a list must not end on a comma.
                let empty = n == 1;
                return if empty || (well_formed && !expect_identifier) {
                    CloseAhead::Yes
                } else {
                    CloseAhead::Malformed
                };
            }
            Delimiter::Identifier => {
                if !expect_identifier {
                    // Two names without a comma is ordinary code, not a list.
                    return CloseAhead::No;
                }
                expect_identifier = false;
            }
            Delimiter::Comma => {
                if expect_identifier {
                    well_formed = false;
                }
                expect_identifier = true;
            }
            _ => return CloseAhead::No,
        }
        n += 1;
    }
}

/// Parse a whole routine, stopping at the first error.
pub fn parse_routine<'src, G: BlockGrammar<'src>>(
    grammar: &mut G,
) -> Result<Routine<G::Body>, SyntaxError> {
    let mut routine = Routine::new();

    while !grammar.cursor().is_at_end() {
        routine.blocks.push(parse_scheduled_block(grammar)?);
    }

    debug!(blocks = routine.blocks.len(), "parsed routine");
    Ok(routine)
}

/// Parse a whole routine, recording an error per failed scheduled block and
/// resuming at the next `<` that can open a block.
pub fn parse_routine_recovering<'src, G: BlockGrammar<'src>>(
    grammar: &mut G,
) -> (Routine<G::Body>, Vec<SyntaxError>) {
    let mut routine = Routine::new();
    let mut errors = Vec::new();

    while !grammar.cursor().is_at_end() {
        let start = grammar.cursor().position();
        match parse_scheduled_block(grammar) {
            Ok(block) => routine.blocks.push(block),
            Err(err) => {
                debug!(error = %err, "skipping to next scheduled block");
                errors.push(err);
                let cursor = grammar.cursor();
                if cursor.position() == start {
                    cursor.advance();
                }
                cursor.synchronize();
            }
        }
    }

    debug!(
        blocks = routine.blocks.len(),
        errors = errors.len(),
        "parsed routine with recovery"
    );
    (routine, errors)
}

pub fn parse_scheduled_block<'src, G: BlockGrammar<'src>>(
    grammar: &mut G,
) -> Result<ScheduledBlock<G::Body>, SyntaxError> {
    let cursor = grammar.cursor();
    let start = cursor.peek().start();

    expect_delimiter(cursor, Delimiter::Lt, "'<' opening a scheduled block")?;
    let open_flags = parse_optional_flags(cursor)?;
    expect_delimiter(cursor, Delimiter::Dash, "'-'")?;

    let body = grammar.parse_body()?;

    let cursor = grammar.cursor();
    expect_delimiter(cursor, Delimiter::Dash, "'-' closing the scheduled block")?;
    let close_flags = parse_optional_flags(cursor)?;
    let end = expect_delimiter(cursor, Delimiter::Gt, "'>'")?;

    trace!(
        open = ?open_flags,
        close = ?close_flags,
        start,
        end,
        "scheduled block"
    );

    Ok(ScheduledBlock {
        open_flags,
        close_flags,
        body,
        span: (start..end).into(),
    })
}

/// `flag_list?` - empty when the next token is not an identifier. A leading
/// comma is rejected here, a trailing one by [`parse_flag_list`].
fn parse_optional_flags<K: TokenKind>(
    cursor: &mut TokenCursor<'_, K>,
) -> Result<Vec<String>, SyntaxError> {
    match cursor.delimiter() {
        Delimiter::Identifier => parse_flag_list(cursor),
        Delimiter::Comma => Err(cursor.error_expected("flag name")),
        _ => Ok(Vec::new()),
    }
}

fn parse_flag_list<K: TokenKind>(
    cursor: &mut TokenCursor<'_, K>,
) -> Result<Vec<String>, SyntaxError> {
    let mut flags = vec![cursor.expect_identifier()?.to_string()];

    while cursor.delimiter() == Delimiter::Comma {
        cursor.advance();
        if cursor.delimiter() != Delimiter::Identifier {
            return Err(cursor.error_expected("flag name"));
        }
        flags.push(cursor.advance().text.to_string());
    }

    Ok(flags)
}

/// Consume a delimiter token, returning the end offset of what it consumed.
fn expect_delimiter<K: TokenKind>(
    cursor: &mut TokenCursor<'_, K>,
    delimiter: Delimiter,
    expected: &str,
) -> Result<usize, SyntaxError> {
    if cursor.delimiter() == delimiter {
        Ok(cursor.advance().end())
    } else {
        Err(cursor.error_expected(expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structural::lexer::tokenize;

    fn close(source: &str) -> CloseAhead {
        close_ahead(&TokenCursor::new(source, tokenize(source)))
    }

    #[test]
    fn test_close_ahead() {
        assert_eq!(close("->"), CloseAhead::Yes);
        assert_eq!(close("- a >"), CloseAhead::Yes);
        assert_eq!(close("-a,b,c>"), CloseAhead::Yes);
        assert_eq!(close("-,a>"), CloseAhead::Malformed);
        assert_eq!(close("-a,>"), CloseAhead::Malformed);
        assert_eq!(close("-a,,b>"), CloseAhead::Malformed);
        assert_eq!(close("- a b >"), CloseAhead::No);
        assert_eq!(close("- a;"), CloseAhead::No);
        assert_eq!(close("a ->"), CloseAhead::No);
        assert_eq!(close("-"), CloseAhead::No);
    }
}
