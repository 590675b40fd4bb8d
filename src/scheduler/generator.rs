//! Required matchup generation.
//!
//! Derives every pairing the season must contain from the roster:
//! divisional rivals meet twice, all other pairs meet once. With 3
//! divisions of 4 that is 18 divisional pairs and 48 cross-division
//! pairs, 84 games in total.

use crate::error::ScheduleError;
use crate::models::{MatchupKind, MatchupRequirement, MatchupSet, Roster};
use crate::TOTAL_GAMES;

/// Builds the full requirement set for a roster.
///
/// Divisional pairs come first (division by division, members in rank
/// order), then cross-division pairs (division pairs in roster order).
/// The result depends only on the roster.
///
/// # Errors
/// [`ScheduleError::MatchupCount`] if the occurrences do not sum to 84.
/// A validated roster never triggers it.
pub fn generate_matchups(roster: &Roster) -> Result<MatchupSet, ScheduleError> {
    let mut set = MatchupSet::new();
    let divisions = roster.divisions();

    for division in divisions {
        for (i, &a) in division.teams.iter().enumerate() {
            for &b in &division.teams[i + 1..] {
                set.push(MatchupRequirement::new(a, b, MatchupKind::Divisional));
            }
        }
    }

    for (i, left) in divisions.iter().enumerate() {
        for right in &divisions[i + 1..] {
            for &a in &left.teams {
                for &b in &right.teams {
                    set.push(MatchupRequirement::new(a, b, MatchupKind::Interdivisional));
                }
            }
        }
    }

    let found = set.total_required();
    if found != TOTAL_GAMES {
        return Err(ScheduleError::MatchupCount {
            expected: TOTAL_GAMES,
            found,
        });
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::test_support::sample_roster;
    use crate::TOTAL_TEAMS;

    #[test]
    fn test_requirement_counts() {
        let roster = sample_roster();
        let set = generate_matchups(&roster).unwrap();

        assert_eq!(set.len(), 66);
        assert_eq!(set.total_required(), 84);
        let divisional = set
            .requirements()
            .iter()
            .filter(|r| r.kind == MatchupKind::Divisional)
            .count();
        assert_eq!(divisional, 18);
        assert!(set
            .requirements()
            .iter()
            .filter(|r| r.kind == MatchupKind::Divisional)
            .all(|r| r.required == 2 && roster.same_division(r.first, r.second)));
        assert!(set
            .requirements()
            .iter()
            .filter(|r| r.kind == MatchupKind::Interdivisional)
            .all(|r| r.required == 1 && !roster.same_division(r.first, r.second)));
    }

    #[test]
    fn test_every_team_plays_fourteen() {
        let roster = sample_roster();
        let set = generate_matchups(&roster).unwrap();

        for team in 0..TOTAL_TEAMS {
            let games: u32 = set
                .requirements()
                .iter()
                .filter(|r| r.involves(team))
                .map(|r| u32::from(r.required))
                .sum();
            assert_eq!(games, 14);
        }
    }

    #[test]
    fn test_every_pair_present_once() {
        let roster = sample_roster();
        let set = generate_matchups(&roster).unwrap();

        for a in 0..TOTAL_TEAMS {
            for b in 0..TOTAL_TEAMS {
                if a != b {
                    let id = set.find(a, b).unwrap();
                    assert!(set.get(id).involves(a) && set.get(id).involves(b));
                }
            }
        }
    }

    #[test]
    fn test_generation_is_repeatable() {
        let roster = sample_roster();
        let mut first = generate_matchups(&roster).unwrap().games();
        let mut second = generate_matchups(&roster).unwrap().games();
        assert_eq!(first.len(), 84);
        first.sort_unstable();
        second.sort_unstable();
        assert_eq!(first, second);
    }
}
