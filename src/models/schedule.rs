//! Season schedule (solution) model.
//!
//! A schedule is the complete assignment of games to weeks. Games are
//! stored by team name so the schedule stands on its own once the search
//! state is gone, and can be exported with serde.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A complete season schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Game assignments in placement order.
    pub assignments: Vec<Assignment>,
}

/// A game placed in a week.
///
/// `home`/`away` is only the presentation order of the pair; the
/// pairing itself is unordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Week number (1-based).
    pub week: u8,
    /// First team of the pair.
    pub home: String,
    /// Second team of the pair.
    pub away: String,
}

/// A constraint violation found by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity (week, team, or pair label).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A week does not pair every team exactly once.
    WeeklyCoverage,
    /// A pair meets a different number of times than required.
    Quota,
    /// A rematch is played too soon after the first meeting.
    Cooldown,
    /// Two rematches share the same pair of weeks.
    PatternRepeat,
    /// The final week differs from the rivalry pairings.
    RivalryWeek,
    /// A game names a team outside the roster.
    UnknownTeam,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(week: u8, home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            week,
            home: home.into(),
            away: away.into(),
        }
    }

    /// Whether the game involves the team.
    #[inline]
    pub fn involves(&self, team: &str) -> bool {
        self.home == team || self.away == team
    }

    /// Whether the game is between the two teams, in either order.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.home == a && self.away == b) || (self.home == b && self.away == a)
    }

    /// The pair as a tuple of names in sorted order.
    pub fn sorted_pair(&self) -> (&str, &str) {
        if self.home <= self.away {
            (self.home.as_str(), self.away.as_str())
        } else {
            (self.away.as_str(), self.home.as_str())
        }
    }
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// All games in a week.
    pub fn week(&self, week: u8) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| a.week == week).collect()
    }

    /// All games involving a team, in placement order.
    pub fn games_for_team(&self, team: &str) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| a.involves(team)).collect()
    }

    /// Sorted weeks in which two teams meet.
    pub fn weeks_for_pair(&self, a: &str, b: &str) -> Vec<u8> {
        let mut weeks: Vec<u8> = self
            .assignments
            .iter()
            .filter(|g| g.is_between(a, b))
            .map(|g| g.week)
            .collect();
        weeks.sort_unstable();
        weeks
    }

    /// Week number → list of team pairs, each week's pairs sorted.
    pub fn week_map(&self) -> BTreeMap<u8, Vec<(String, String)>> {
        let mut map: BTreeMap<u8, Vec<(String, String)>> = BTreeMap::new();
        for a in &self.assignments {
            let (x, y) = a.sorted_pair();
            map.entry(a.week)
                .or_default()
                .push((x.to_string(), y.to_string()));
        }
        for games in map.values_mut() {
            games.sort();
        }
        map
    }

    /// Highest week number with a game.
    pub fn last_week(&self) -> u8 {
        self.assignments.iter().map(|a| a.week).max().unwrap_or(0)
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (week, games) in self.week_map() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            writeln!(f, "Week {week}:")?;
            for (a, b) in games {
                writeln!(f, "  {a} vs. {b}")?;
            }
        }
        Ok(())
    }
}
