//! Type and name parsing
//!
//! ```text
//! type ::= (primitive_type | name ('<' type (',' type)* '>')?) ('[' ']')*
//! name ::= IDENTIFIER ('.' IDENTIFIER)*
//! ```
//!
//! Array suffixes apply after any generic argument list, each one wrapping
//! the type built so far.

use crate::ast::{Name, Type};
use crate::error::SyntaxError;
use crate::full::lexer::FullKind;
use crate::full::parser::Parser;
use crate::token::Delimiter;

impl<'src> Parser<'src> {
    pub(crate) fn parse_type(&mut self) -> Result<Type, SyntaxError> {
        let mut ty = if let Some(primitive) = self.cursor.peek_kind().primitive() {
            self.cursor.advance();
            Type::Primitive(primitive)
        } else if self.cursor.check(FullKind::Identifier) {
            let name = self.parse_name()?;
            if self.cursor.check(FullKind::Lt) {
                Type::Named {
                    name,
                    arguments: self.parse_type_arguments()?,
                }
            } else {
                Type::named(name)
            }
        } else {
            return Err(self.cursor.error_expected("type"));
        };

        // `[` not followed by `]` is an index, not part of the type.
        while self.cursor.check(FullKind::LeftBracket)
            && self.cursor.peek_ahead(1).kind == FullKind::RightBracket
        {
            self.cursor.advance();
            self.cursor.advance();
            ty = Type::array_of(ty);
        }

        Ok(ty)
    }

    fn parse_type_arguments(&mut self) -> Result<Vec<Type>, SyntaxError> {
        self.cursor.expect_token(FullKind::Lt)?;
        let mut arguments = vec![self.parse_type()?];
        while self.cursor.match_token(FullKind::Comma) {
            arguments.push(self.parse_type()?);
        }
        self.cursor.expect_token(FullKind::Gt)?;
        Ok(arguments)
    }

    pub(crate) fn parse_name(&mut self) -> Result<Name, SyntaxError> {
        let mut segments = vec![self.cursor.expect_identifier()?.to_string()];
        while self.cursor.match_token(FullKind::Dot) {
            segments.push(self.cursor.expect_identifier()?.to_string());
        }
        Ok(Name { segments })
    }

    /// Trial parse of `type IDENTIFIER`; the cursor is left untouched.
    pub(crate) fn at_declaration(&mut self) -> bool {
        if self.cursor.peek_kind().primitive().is_some() {
            return true;
        }

        let saved_pos = self.cursor.position();
        let matched =
            self.parse_type().is_ok() && self.cursor.delimiter() == Delimiter::Identifier;
        self.cursor.rewind(saved_pos);
        matched
    }
}
