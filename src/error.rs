//! Error types.

use thiserror::Error;

use crate::config::ConfigError;
use crate::models::Violation;
use crate::scheduler::AttemptReport;
use crate::validation::ValidationError;

/// Errors raised while loading or validating a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Roster is missing required columns: {0}")]
    MissingColumns(String),

    #[error("Malformed roster row at line {line}: {message}")]
    MalformedRow { line: usize, message: String },

    #[error("Invalid roster: {}", join_messages(.0))]
    Invalid(Vec<ValidationError>),
}

/// Errors raised by the scheduling pipeline.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Generated {found} matchups, but expected {expected}")]
    MatchupCount { expected: u32, found: u32 },

    #[error("Rivalry pairing {0} vs. {1} has no remaining divisional occurrence")]
    RivalryPairMissing(String, String),

    #[error(
        "Could not generate a valid schedule after {attempts} attempts \
         (last attempt backtracked {last_backtracks} times)"
    )]
    AllAttemptsFailed {
        attempts: usize,
        last_backtracks: u64,
        reports: Vec<AttemptReport>,
    },

    #[error("Schedule failed validation: {}", join_violations(.0))]
    InvariantViolation(Vec<Violation>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
