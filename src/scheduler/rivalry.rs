//! Rivalry week assignment.
//!
//! The final week is fixed before any search: in every division the
//! rank-1 team meets rank 2 and rank 3 meets rank 4, based on the previous
//! season. Each of these six games consumes one of the pair's two
//! divisional occurrences; the other meeting is left to the search.

use crate::error::ScheduleError;
use crate::models::{MatchupSet, RequirementId, Roster, TeamId};
use crate::RIVALRY_WEEK;

/// The frozen rivalry week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RivalryWeek {
    /// Week number (always the season's last week).
    pub week: u8,
    /// Requirements played this week, two per division.
    pub games: Vec<RequirementId>,
}

/// Rank-based rivalry pairings, two per division in division order.
pub fn rivalry_pairings(roster: &Roster) -> Vec<(TeamId, TeamId)> {
    let mut pairs = Vec::with_capacity(roster.divisions().len() * 2);
    for division in roster.divisions() {
        if let (Some(r1), Some(r2), Some(r3), Some(r4)) = (
            division.by_rank(1),
            division.by_rank(2),
            division.by_rank(3),
            division.by_rank(4),
        ) {
            pairs.push((r1, r2));
            pairs.push((r3, r4));
        }
    }
    pairs
}

/// Fixes the rivalry week and consumes one occurrence of each pairing.
///
/// # Errors
/// [`ScheduleError::RivalryPairMissing`] if a pairing has no requirement or
/// no outstanding occurrence left.
pub fn assign_rivalry_week(
    roster: &Roster,
    matchups: &mut MatchupSet,
) -> Result<RivalryWeek, ScheduleError> {
    let mut games = Vec::new();

    for (a, b) in rivalry_pairings(roster) {
        let missing = || {
            ScheduleError::RivalryPairMissing(
                roster.team(a).name.clone(),
                roster.team(b).name.clone(),
            )
        };
        let id = matchups.find(a, b).ok_or_else(missing)?;
        let requirement = matchups.get_mut(id);
        if requirement.remaining == 0 {
            return Err(missing());
        }
        requirement.remaining -= 1;
        games.push(id);
    }

    Ok(RivalryWeek {
        week: RIVALRY_WEEK,
        games,
    })
}
