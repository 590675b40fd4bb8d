//! Input validation for league rosters.
//!
//! Checks structural integrity of the team list before any matchup is
//! generated. Detects:
//! - Wrong team or division counts
//! - Empty names or division labels
//! - Duplicate team names
//! - Ranks outside `1..=4` or repeated within a division
//!
//! All problems are collected; the caller sees every issue at once.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::models::Team;
use crate::{TEAMS_PER_DIVISION, TOTAL_DIVISIONS, TOTAL_TEAMS};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The roster does not hold exactly 12 teams.
    TeamCount,
    /// A team has an empty name or division label.
    EmptyField,
    /// Two teams share the same name.
    DuplicateName,
    /// The roster does not hold exactly 3 divisions.
    DivisionCount,
    /// A division does not hold exactly 4 teams.
    DivisionSize,
    /// A rank lies outside `1..=4`.
    RankOutOfRange,
    /// Two teams in one division share a rank.
    DuplicateRank,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a team list against the league structure.
///
/// Checks:
/// 1. Exactly 12 teams
/// 2. Non-empty names and division labels
/// 3. Unique team names
/// 4. Exactly 3 divisions of 4 teams
/// 5. Every rank in `1..=4`, unique within its division
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(teams: &[Team]) -> ValidationResult {
    let mut errors = Vec::new();

    if teams.len() != TOTAL_TEAMS {
        errors.push(ValidationError::new(
            ValidationErrorKind::TeamCount,
            format!(
                "The roster must contain exactly {TOTAL_TEAMS} teams. Found {}.",
                teams.len()
            ),
        ));
    }

    let mut names = HashSet::new();
    let mut divisions: HashMap<&str, Vec<&Team>> = HashMap::new();
    let mut division_order: Vec<&str> = Vec::new();

    for team in teams {
        if team.name.trim().is_empty() || team.division.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyField,
                format!(
                    "Team name and division name cannot be empty (team '{}', division '{}')",
                    team.name, team.division
                ),
            ));
        }

        if !names.insert(team.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate team name: {}", team.name),
            ));
        }

        if !(1..=TEAMS_PER_DIVISION as u8).contains(&team.rank) {
            errors.push(ValidationError::new(
                ValidationErrorKind::RankOutOfRange,
                format!(
                    "Team '{}' has rank {}; ranks must lie in 1..={TEAMS_PER_DIVISION}",
                    team.name, team.rank
                ),
            ));
        }

        let members = divisions.entry(team.division.as_str()).or_default();
        if members.is_empty() {
            division_order.push(team.division.as_str());
        }
        members.push(team);
    }

    if divisions.len() != TOTAL_DIVISIONS {
        errors.push(ValidationError::new(
            ValidationErrorKind::DivisionCount,
            format!(
                "The league must have exactly {TOTAL_DIVISIONS} divisions. Found {}.",
                divisions.len()
            ),
        ));
    }

    for division in division_order {
        let members = &divisions[division];
        if members.len() != TEAMS_PER_DIVISION {
            errors.push(ValidationError::new(
                ValidationErrorKind::DivisionSize,
                format!(
                    "Division '{division}' must have {TEAMS_PER_DIVISION} teams. Found {}.",
                    members.len()
                ),
            ));
        }

        let mut ranks = HashSet::new();
        for team in members {
            if !ranks.insert(team.rank) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateRank,
                    format!("Division '{division}' has more than one team at rank {}", team.rank),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
