//! # Introduction
//!
//! Front end for Routine, a small language of time-scheduled blocks. A
//! routine file is a sequence of scheduled blocks:
//!
//! ```text
//! <once- @node; if (ready) emit(@sig); -once>
//! ```
//!
//! Each block has optional flag lists on its open and close delimiters and
//! a body written in a C-like statement language that may mention story
//! nodes (`@node`) and signals (`@sig`).
//!
//! ## Pipelines
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Routine
//! ```
//!
//! Two independent pipelines share the block delimiter syntax:
//!
//! 1. [`structural`] - tolerant. Any character it does not know is noise,
//!    and only the `@node`/`@sig` references of each body are kept. Never
//!    produces a [`LexicalError`].
//! 2. [`full`] - precise. Builds [`ast::Statement`] and [`ast::Expression`]
//!    trees and rejects anything outside the grammar.
//!
//! Both offer a fail-fast `parse` and a `parse_recovering` that resumes at
//! the next scheduled block after an error. [`validate`] wraps the full
//! pipeline for editors, and [`flags::FlagCache`] numbers the flags used
//! across routines.
//!
//! The library never prints; it emits [`tracing`] events at `debug` and
//! `trace` level.

pub mod ast;
pub mod block;
pub mod cursor;
pub mod error;
pub mod flags;
pub mod full;
pub mod source;
pub mod structural;
pub mod token;
pub mod validate;

pub use error::{LexicalError, RoutineError, SyntaxError};
pub use source::{SourceLocation, Span};
pub use validate::{validate, Pipeline, RecoveryMode, RoutineKind, ValidationReport};
