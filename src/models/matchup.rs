//! Matchup requirements.
//!
//! A requirement is an unordered pair of teams plus the number of times
//! the pair must meet during the season: twice for divisional rivals,
//! once for everyone else. Requirements live in an arena ([`MatchupSet`])
//! and are addressed by integer [`RequirementId`].

use serde::{Deserialize, Serialize};

use super::TeamId;
use crate::TOTAL_TEAMS;

/// Index of a requirement inside its [`MatchupSet`].
pub type RequirementId = usize;

/// Whether a pairing is divisional or cross-division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchupKind {
    /// Both teams share a division; played twice.
    Divisional,
    /// Teams from different divisions; played once.
    Interdivisional,
}

impl MatchupKind {
    /// Number of season occurrences this kind requires.
    pub fn required_count(self) -> u8 {
        match self {
            MatchupKind::Divisional => 2,
            MatchupKind::Interdivisional => 1,
        }
    }
}

/// A required pairing and its outstanding demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchupRequirement {
    /// Lower team id of the pair.
    pub first: TeamId,
    /// Higher team id of the pair.
    pub second: TeamId,
    /// Divisional or cross-division.
    pub kind: MatchupKind,
    /// Total occurrences required over the season.
    pub required: u8,
    /// Occurrences not yet placed.
    pub remaining: u8,
}

impl MatchupRequirement {
    /// Creates a requirement with full outstanding demand.
    ///
    /// The pair is normalized so that `first < second`.
    pub fn new(a: TeamId, b: TeamId, kind: MatchupKind) -> Self {
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        let required = kind.required_count();
        Self {
            first,
            second,
            kind,
            required,
            remaining: required,
        }
    }

    /// Whether the pair involves the team.
    #[inline]
    pub fn involves(&self, team: TeamId) -> bool {
        self.first == team || self.second == team
    }

    /// The other team of the pair.
    ///
    /// Returns `None` if `team` is not part of the pair.
    pub fn opponent(&self, team: TeamId) -> Option<TeamId> {
        if self.first == team {
            Some(self.second)
        } else if self.second == team {
            Some(self.first)
        } else {
            None
        }
    }

    /// Whether this pair is played twice.
    pub fn is_rematch(&self) -> bool {
        self.required == 2
    }
}

/// Arena of matchup requirements with O(1) pair lookup.
#[derive(Debug, Clone)]
pub struct MatchupSet {
    requirements: Vec<MatchupRequirement>,
    pair_index: [[Option<RequirementId>; TOTAL_TEAMS]; TOTAL_TEAMS],
}

impl MatchupSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            requirements: Vec::new(),
            pair_index: [[None; TOTAL_TEAMS]; TOTAL_TEAMS],
        }
    }

    /// Adds a requirement and returns its id.
    ///
    /// # Panics
    /// Panics if either team id is outside the league.
    pub fn push(&mut self, requirement: MatchupRequirement) -> RequirementId {
        let id = self.requirements.len();
        self.pair_index[requirement.first][requirement.second] = Some(id);
        self.pair_index[requirement.second][requirement.first] = Some(id);
        self.requirements.push(requirement);
        id
    }

    /// Requirement lookup by unordered pair.
    pub fn find(&self, a: TeamId, b: TeamId) -> Option<RequirementId> {
        self.pair_index.get(a)?.get(b).copied().flatten()
    }

    /// All requirements in creation order.
    pub fn requirements(&self) -> &[MatchupRequirement] {
        &self.requirements
    }

    /// A single requirement.
    pub fn get(&self, id: RequirementId) -> &MatchupRequirement {
        &self.requirements[id]
    }

    /// Mutable access to a single requirement.
    pub fn get_mut(&mut self, id: RequirementId) -> &mut MatchupRequirement {
        &mut self.requirements[id]
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Whether the set holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Sum of required occurrences over all pairs.
    pub fn total_required(&self) -> u32 {
        self.requirements.iter().map(|r| u32::from(r.required)).sum()
    }

    /// Sum of outstanding occurrences over all pairs.
    pub fn total_remaining(&self) -> u32 {
        self.requirements.iter().map(|r| u32::from(r.remaining)).sum()
    }

    /// Expands the set into its game multiset, one entry per required occurrence.
    pub fn games(&self) -> Vec<(TeamId, TeamId)> {
        self.requirements
            .iter()
            .flat_map(|r| std::iter::repeat((r.first, r.second)).take(usize::from(r.required)))
            .collect()
    }
}

impl Default for MatchupSet {
    fn default() -> Self {
        Self::new()
    }
}
