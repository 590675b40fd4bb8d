//! Ordering heuristics for the schedule search.
//!
//! Runtime-selectable strategies for the three choices the search makes:
//! which week to fill next, which unmatched team to pair within a week,
//! and in which order to try that team's legal opponents.
//!
//! # Usage
//!
//! ```
//! use season_schedule::ordering::{OpponentOrdering, TeamSelection, WeekOrder};
//!
//! assert_eq!(TeamSelection::default(), TeamSelection::FewestOptions);
//! assert_eq!(OpponentOrdering::default(), OpponentOrdering::MostDemand);
//! assert_eq!(WeekOrder::Descending.sequence(13), (1..=13).rev().collect::<Vec<u8>>());
//! ```
//!
//! # References
//! - Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//!   Constraint Satisfaction Problems" (fail-first variable ordering)

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Order in which the open weeks are filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekOrder {
    /// Last open week first, working back toward week 1.
    #[default]
    Descending,
    /// Week 1 first.
    Ascending,
}

impl WeekOrder {
    /// The weeks `1..=last` in fill order.
    pub fn sequence(self, last: u8) -> Vec<u8> {
        match self {
            WeekOrder::Descending => (1..=last).rev().collect(),
            WeekOrder::Ascending => (1..=last).collect(),
        }
    }
}

/// Which unmatched team the matching step pairs next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSelection {
    /// The team with the fewest legal opponents (fail first).
    #[default]
    FewestOptions,
    /// The lowest-numbered unmatched team.
    FirstUnmatched,
}

/// Order in which a team's legal opponents are tried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentOrdering {
    /// Pairs with the most outstanding games first, random among equals.
    ///
    /// Divisional pairs with both meetings still open are cleared early,
    /// while many weeks remain to satisfy their cooldown and week-pair
    /// rules. Single-meeting pairs are left for later weeks, where they
    /// fit into whatever gaps remain.
    #[default]
    MostDemand,
    /// Uniformly shuffled.
    Shuffled,
}

/// A legal opponent for the team being paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Requirement the placement would consume.
    pub requirement: usize,
    /// Outstanding occurrences of that requirement.
    pub remaining: u8,
}

impl OpponentOrdering {
    /// Sorts candidates in place, best first.
    ///
    /// Ties are broken by `rng`, so the same seed yields the same order.
    pub fn order<R: Rng>(self, candidates: &mut [Candidate], rng: &mut R) {
        candidates.shuffle(rng);
        if self == OpponentOrdering::MostDemand {
            // Stable: keeps the shuffled order among equal demand.
            candidates.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        }
    }
}
