//! Team model.
//!
//! A team is the unit that plays one game per week. Each team belongs
//! to exactly one division and carries its finishing rank from the
//! previous season, which drives the rivalry-week pairings.

use serde::{Deserialize, Serialize};

/// Integer handle for a team inside a validated [`Roster`](super::Roster).
///
/// Ids follow roster input order, `0..TOTAL_TEAMS`.
pub type TeamId = usize;

/// A league team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique team name.
    pub name: String,
    /// Division label.
    pub division: String,
    /// Previous-season finish within the division (1 = best).
    pub rank: u8,
}

impl Team {
    /// Creates a new team.
    pub fn new(name: impl Into<String>, division: impl Into<String>, rank: u8) -> Self {
        Self {
            name: name.into(),
            division: division.into(),
            rank,
        }
    }

    /// Sets the team name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the division label.
    pub fn with_division(mut self, division: impl Into<String>) -> Self {
        self.division = division.into();
        self
    }

    /// Sets the previous-season rank.
    pub fn with_rank(mut self, rank: u8) -> Self {
        self.rank = rank;
        self
    }

    /// Whether both teams share a division.
    pub fn is_divisional_rival(&self, other: &Team) -> bool {
        self.division == other.division && self.name != other.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_builder() {
        let team = Team::new("Hawks", "North", 1)
            .with_name("Falcons")
            .with_division("South")
            .with_rank(3);

        assert_eq!(team.name, "Falcons");
        assert_eq!(team.division, "South");
        assert_eq!(team.rank, 3);
    }

    #[test]
    fn test_divisional_rival() {
        let a = Team::new("A", "North", 1);
        let b = Team::new("B", "North", 2);
        let c = Team::new("C", "South", 1);

        assert!(a.is_divisional_rival(&b));
        assert!(!a.is_divisional_rival(&c));
        assert!(!a.is_divisional_rival(&a));
    }

    #[test]
    fn test_team_json() {
        let json = r#"{"name":"Hawks","division":"North","rank":2}"#;
        let team: Team = serde_json::from_str(json).unwrap();
        assert_eq!(team, Team::new("Hawks", "North", 2));
    }
}
