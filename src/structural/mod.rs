//! Tolerant front end
//!
//! - [`lexer`]: minimal token set, unknown characters become noise
//! - [`parser`]: scheduled blocks with their `@node`/`@sig` references
//!
//! Use this pipeline when only the reference graph is needed. It accepts
//! any embedded code between the block delimiters.

pub mod lexer;
pub mod parser;

pub use parser::{parse, parse_recovering, StructuralParser};
