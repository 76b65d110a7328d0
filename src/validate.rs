//! Validation of routine and condition code
//!
//! Editors and exporters only need to know whether a snippet parses and,
//! if not, where the first problem is. [`validate`] answers that with a
//! serialisable [`ValidationReport`]. [`diagnostics`] returns the raw
//! errors for a chosen [`Pipeline`] and [`RecoveryMode`].

use crate::error::RoutineError;
use crate::{full, structural};
use serde::Serialize;
use tracing::debug;

/// Which front end to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Pipeline {
    /// Tolerant pass collecting `@node`/`@sig` references.
    Structural,
    /// Precise pass building statements and expressions.
    #[default]
    Full,
}

/// What to do after the first error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryMode {
    #[default]
    FailFast,
    /// Skip to the next scheduled block and keep collecting errors.
    Accumulate,
}

/// Shape of the code being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RoutineKind {
    /// Scheduled blocks of statements.
    #[default]
    Routine,
    /// A single expression with nothing after it.
    Condition,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub error_line: Option<usize>,
    pub error_column: Option<usize>,
    pub message: Option<String>,
}

impl ValidationReport {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            ..Self::default()
        }
    }

    pub fn from_error(err: &RoutineError) -> Self {
        let location = err.location();
        Self {
            is_valid: false,
            error_line: Some(location.line),
            error_column: Some(location.column),
            message: Some(err.to_string()),
        }
    }
}

/// Check `source` with the full grammar and report the first error.
/// Blank code is always valid.
pub fn validate(source: &str, kind: RoutineKind) -> ValidationReport {
    if source.trim().is_empty() {
        return ValidationReport::valid();
    }

    let result = match kind {
        RoutineKind::Routine => full::parse(source).map(drop),
        RoutineKind::Condition => full::parse_condition(source).map(drop),
    };

    match result {
        Ok(()) => ValidationReport::valid(),
        Err(err) => {
            debug!(?kind, error = %err, "validation failed");
            ValidationReport::from_error(&err)
        }
    }
}

/// Every error `source` produces as a routine. In
/// [`RecoveryMode::FailFast`] that is at most one.
pub fn diagnostics(source: &str, pipeline: Pipeline, mode: RecoveryMode) -> Vec<RoutineError> {
    match (pipeline, mode) {
        (Pipeline::Structural, RecoveryMode::FailFast) => {
            structural::parse(source).err().map(RoutineError::from).into_iter().collect()
        }
        (Pipeline::Structural, RecoveryMode::Accumulate) => structural::parse_recovering(source).1,
        (Pipeline::Full, RecoveryMode::FailFast) => full::parse(source).err().into_iter().collect(),
        (Pipeline::Full, RecoveryMode::Accumulate) => full::parse_recovering(source).1,
    }
}
