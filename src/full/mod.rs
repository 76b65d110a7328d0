//! Precise front end for the embedded statement language
//!
//! - [`lexer`]: complete token set, unknown characters are errors
//! - [`parser`]: [`Parser`] and the public entry points
//! - [`precedence`]: the operator table used by expression parsing
//!
//! Statement, expression and type rules extend [`Parser`] from their own
//! files.

mod expressions;
pub mod lexer;
pub mod parser;
pub mod precedence;
mod statements;
mod types;

pub use parser::{parse, parse_condition, parse_recovering, Parser};
