//! Backtracking schedule search.
//!
//! # Algorithm
//!
//! 1. Visit the open weeks in the configured order.
//! 2. Within a week, pick an unmatched team (fewest legal opponents by
//!    default), order its legal opponents, and place one.
//! 3. Recurse until the week is a perfect matching, run the lookahead,
//!    then move to the next week.
//! 4. On a dead end, undo the latest placement and try the next option.
//!
//! Every undo counts as one backtrack. Once the count exceeds the
//! configured limit the attempt stops with
//! [`AttemptOutcome::BacktrackLimitReached`].
//!
//! # Reference
//! Golomb & Baumert (1965), "Backtrack Programming"

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::rivalry::RivalryWeek;
use super::state::SearchState;
use crate::config::SchedulerConfig;
use crate::models::{MatchupSet, Roster, Schedule, TeamId};
use crate::ordering::{Candidate, OpponentOrdering, TeamSelection};
use crate::TOTAL_TEAMS;

/// Terminal state of one search attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptOutcome {
    /// Every open week was filled.
    Solved,
    /// The backtrack counter exceeded its ceiling.
    BacktrackLimitReached,
    /// The whole search space was explored without a solution.
    Exhausted,
}

/// Abort signal for the backtrack ceiling.
struct LimitReached;

/// Fills the open weeks of one attempt.
///
/// A builder owns its [`SearchState`] and random source; it is created
/// per attempt and discarded afterwards.
#[derive(Debug)]
pub struct ScheduleBuilder<'a, R: Rng> {
    state: SearchState<'a>,
    rng: R,
    weeks: Vec<u8>,
    team_selection: TeamSelection,
    opponent_ordering: OpponentOrdering,
    backtrack_limit: u64,
    backtracks: u64,
    placements: u64,
}

impl<'a, R: Rng> ScheduleBuilder<'a, R> {
    /// Creates a builder over `matchups`, whose outstanding demand must
    /// already reflect the rivalry week.
    pub fn new(
        matchups: &'a MatchupSet,
        rivalry: &RivalryWeek,
        config: &SchedulerConfig,
        rng: R,
    ) -> Self {
        let last_open = rivalry.week.saturating_sub(1);
        Self {
            state: SearchState::new(matchups, rivalry, config.min_rematch_gap),
            rng,
            weeks: config.week_order.sequence(last_open),
            team_selection: config.team_selection,
            opponent_ordering: config.opponent_ordering,
            backtrack_limit: config.backtrack_limit,
            backtracks: 0,
            placements: 0,
        }
    }

    /// Runs the search to completion, exhaustion, or the backtrack limit.
    pub fn run(&mut self) -> AttemptOutcome {
        if !self.state.lookahead(&self.weeks) {
            return AttemptOutcome::Exhausted;
        }
        match self.search(0) {
            Ok(true) => AttemptOutcome::Solved,
            Ok(false) => AttemptOutcome::Exhausted,
            Err(LimitReached) => AttemptOutcome::BacktrackLimitReached,
        }
    }

    /// Backtracks performed so far.
    pub fn backtracks(&self) -> u64 {
        self.backtracks
    }

    /// Placements performed so far, including ones later undone.
    pub fn placements(&self) -> u64 {
        self.placements
    }

    /// Read access to the search state.
    pub fn state(&self) -> &SearchState<'a> {
        &self.state
    }

    /// The games currently placed, rivalry week included.
    pub fn schedule(&self, roster: &Roster) -> Schedule {
        self.state.to_schedule(roster)
    }

    fn search(&mut self, depth: usize) -> Result<bool, LimitReached> {
        let Some(&week) = self.weeks.get(depth) else {
            return Ok(true);
        };

        if self.state.week_complete(week) {
            trace!(week, placed = self.state.depth(), "week filled");
            if !self.state.lookahead(&self.weeks[depth + 1..]) {
                return Ok(false);
            }
            return self.search(depth + 1);
        }

        let Some(team) = self.select_team(week) else {
            return Ok(false);
        };

        let mut candidates: Vec<Candidate> = self
            .state
            .options(week, team)
            .map(|requirement| Candidate {
                requirement,
                remaining: self.state.remaining(requirement),
            })
            .collect();
        self.opponent_ordering.order(&mut candidates, &mut self.rng);

        for candidate in candidates {
            self.state.place(week, candidate.requirement);
            self.placements += 1;

            if self.search(depth)? {
                return Ok(true);
            }

            self.state.undo();
            self.backtracks += 1;
            if self.backtracks > self.backtrack_limit {
                return Err(LimitReached);
            }
        }

        Ok(false)
    }

    /// Picks the team to pair next, or `None` if some team has no legal
    /// opponent left in this week.
    fn select_team(&self, week: u8) -> Option<TeamId> {
        let mut free = (0..TOTAL_TEAMS).filter(|&t| self.state.is_free(week, t));

        match self.team_selection {
            TeamSelection::FirstUnmatched => {
                let team = free.next()?;
                (self.state.options(week, team).next().is_some()).then_some(team)
            }
            TeamSelection::FewestOptions => {
                let mut best: Option<(TeamId, usize)> = None;
                for team in free {
                    let count = self.state.options(week, team).count();
                    if count == 0 {
                        return None;
                    }
                    if best.map_or(true, |(_, fewest)| count < fewest) {
                        best = Some((team, count));
                    }
                }
                best.map(|(team, _)| team)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::WeekOrder;
    use crate::scheduler::test_support::sample_roster;
    use crate::scheduler::{assign_rivalry_week, generate_matchups, ScheduleValidator};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn prepared() -> (Roster, MatchupSet, RivalryWeek) {
        let roster = sample_roster();
        let mut matchups = generate_matchups(&roster).unwrap();
        let rivalry = assign_rivalry_week(&roster, &mut matchups).unwrap();
        (roster, matchups, rivalry)
    }

    fn solve_with(
        roster: &Roster,
        matchups: &MatchupSet,
        rivalry: &RivalryWeek,
        config: &SchedulerConfig,
    ) -> Option<Schedule> {
        let seed = config.seed.unwrap_or(0);
        (0..config.max_attempts as u64).find_map(|offset| {
            let rng = StdRng::seed_from_u64(seed + offset);
            let mut builder = ScheduleBuilder::new(matchups, rivalry, config, rng);
            (builder.run() == AttemptOutcome::Solved).then(|| builder.schedule(roster))
        })
    }

    #[test]
    fn test_solves_default_configuration() {
        let (roster, matchups, rivalry) = prepared();
        let config = SchedulerConfig::default()
            .with_seed(1)
            .with_max_attempts(10)
            .with_backtrack_limit(500_000);
        let schedule =
            solve_with(&roster, &matchups, &rivalry, &config).expect("no attempt solved");

        assert_eq!(schedule.assignment_count(), 84);
        let violations = ScheduleValidator::new(&roster, &matchups, 2).validate(&schedule);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_solves_ascending_order() {
        let (roster, matchups, rivalry) = prepared();
        let config = SchedulerConfig::default()
            .with_seed(3)
            .with_max_attempts(10)
            .with_backtrack_limit(500_000)
            .with_week_order(WeekOrder::Ascending);
        let schedule =
            solve_with(&roster, &matchups, &rivalry, &config).expect("no attempt solved");

        let violations = ScheduleValidator::new(&roster, &matchups, 2).validate(&schedule);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let (roster, matchups, rivalry) = prepared();
        let config = SchedulerConfig::default().with_backtrack_limit(200_000);

        let mut a = ScheduleBuilder::new(&matchups, &rivalry, &config, StdRng::seed_from_u64(9));
        let mut b = ScheduleBuilder::new(&matchups, &rivalry, &config, StdRng::seed_from_u64(9));
        let outcome_a = a.run();
        let outcome_b = b.run();

        assert_eq!(outcome_a, outcome_b);
        assert_eq!(a.backtracks(), b.backtracks());
        assert_eq!(a.schedule(&roster), b.schedule(&roster));
    }

    #[test]
    fn test_limit_zero_aborts_on_first_backtrack() {
        let (_, matchups, rivalry) = prepared();
        let config = SchedulerConfig::default().with_backtrack_limit(0);
        let mut builder =
            ScheduleBuilder::new(&matchups, &rivalry, &config, StdRng::seed_from_u64(4));

        match builder.run() {
            AttemptOutcome::Solved => assert_eq!(builder.backtracks(), 0),
            AttemptOutcome::BacktrackLimitReached => assert_eq!(builder.backtracks(), 1),
            AttemptOutcome::Exhausted => panic!("limit 0 cannot exhaust the search space"),
        }
    }

    #[test]
    fn test_impossible_cooldown_is_exhausted() {
        let (_, matchups, rivalry) = prepared();
        let config = SchedulerConfig::default().with_min_rematch_gap(13);
        let mut builder =
            ScheduleBuilder::new(&matchups, &rivalry, &config, StdRng::seed_from_u64(0));

        assert_eq!(builder.run(), AttemptOutcome::Exhausted);
        assert_eq!(builder.backtracks(), 0);
        assert_eq!(builder.placements(), 0);
    }
}
