//! Post-hoc schedule validation.
//!
//! Re-checks a finished season from scratch, by team name, without
//! trusting any search bookkeeping:
//! 1. Every week 1..=14 pairs all 12 teams exactly once
//! 2. Every pair meets exactly as often as required
//! 3. Every rematch respects the cooldown
//! 4. No two rematches share the same pair of weeks
//! 5. The final week equals the rivalry pairings
//!
//! An empty result means the schedule is valid.

use std::collections::{BTreeSet, HashMap};

use super::rivalry::rivalry_pairings;
use crate::models::{MatchupSet, Roster, Schedule, TeamId, Violation, ViolationType};
use crate::{GAMES_PER_WEEK, RIVALRY_WEEK, TOTAL_WEEKS};

/// Independent checker for complete schedules.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleValidator<'a> {
    roster: &'a Roster,
    matchups: &'a MatchupSet,
    min_gap: u8,
}

impl<'a> ScheduleValidator<'a> {
    /// Creates a validator. Only `required` counts of `matchups` are read.
    pub fn new(roster: &'a Roster, matchups: &'a MatchupSet, min_gap: u8) -> Self {
        Self {
            roster,
            matchups,
            min_gap,
        }
    }

    /// Returns every violation found.
    pub fn validate(&self, schedule: &Schedule) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut games: Vec<(u8, TeamId, TeamId)> = Vec::with_capacity(schedule.assignment_count());

        for a in &schedule.assignments {
            match (self.roster.team_id(&a.home), self.roster.team_id(&a.away)) {
                (Some(x), Some(y)) => games.push((a.week, x, y)),
                _ => violations.push(Violation::new(
                    ViolationType::UnknownTeam,
                    format!("{} vs. {}", a.home, a.away),
                    format!(
                        "Week {} game {} vs. {} names a team outside the roster",
                        a.week, a.home, a.away
                    ),
                )),
            }
        }

        self.check_weeks(&games, &mut violations);
        let occurrences = self.check_quota(&games, &mut violations);
        self.check_rematches(&occurrences, &mut violations);
        self.check_rivalry_week(&games, &mut violations);

        violations
    }

    fn pair_label(&self, a: TeamId, b: TeamId) -> String {
        format!("{} vs. {}", self.roster.team(a).name, self.roster.team(b).name)
    }

    fn check_weeks(&self, games: &[(u8, TeamId, TeamId)], violations: &mut Vec<Violation>) {
        for &(week, a, b) in games {
            if week == 0 || usize::from(week) > TOTAL_WEEKS {
                violations.push(Violation::new(
                    ViolationType::WeeklyCoverage,
                    format!("week {week}"),
                    format!("Game {} is placed in nonexistent week {week}", self.pair_label(a, b)),
                ));
            }
        }

        for week in 1..=TOTAL_WEEKS as u8 {
            let mut appearances = vec![0usize; self.roster.team_count()];
            let mut count = 0;
            for &(_, a, b) in games.iter().filter(|g| g.0 == week) {
                appearances[a] += 1;
                appearances[b] += 1;
                count += 1;
            }

            if count != GAMES_PER_WEEK {
                violations.push(Violation::new(
                    ViolationType::WeeklyCoverage,
                    format!("week {week}"),
                    format!("Week {week} has {count} games; expected {GAMES_PER_WEEK}"),
                ));
            }
            for (team, &n) in appearances.iter().enumerate() {
                if n != 1 {
                    violations.push(Violation::new(
                        ViolationType::WeeklyCoverage,
                        format!("week {week}"),
                        format!(
                            "Team {} plays {n} times in week {week}",
                            self.roster.team(team).name
                        ),
                    ));
                }
            }
        }
    }

    /// Checks per-pair totals; returns the sorted weeks of each requirement.
    fn check_quota(
        &self,
        games: &[(u8, TeamId, TeamId)],
        violations: &mut Vec<Violation>,
    ) -> Vec<Vec<u8>> {
        let mut weeks: Vec<Vec<u8>> = vec![Vec::new(); self.matchups.len()];

        for &(week, a, b) in games {
            match self.matchups.find(a, b) {
                Some(id) => weeks[id].push(week),
                None => violations.push(Violation::new(
                    ViolationType::Quota,
                    self.pair_label(a, b),
                    format!("Week {week} game {} is not a required matchup", self.pair_label(a, b)),
                )),
            }
        }

        for (id, played) in weeks.iter_mut().enumerate() {
            played.sort_unstable();
            let r = self.matchups.get(id);
            if played.len() != usize::from(r.required) {
                violations.push(Violation::new(
                    ViolationType::Quota,
                    self.pair_label(r.first, r.second),
                    format!(
                        "{} is played {} times; expected {}",
                        self.pair_label(r.first, r.second),
                        played.len(),
                        r.required
                    ),
                ));
            }
        }

        weeks
    }

    fn check_rematches(&self, occurrences: &[Vec<u8>], violations: &mut Vec<Violation>) {
        let mut patterns: HashMap<(u8, u8), usize> = HashMap::new();

        for (id, weeks) in occurrences.iter().enumerate() {
            let &[first, second] = weeks.as_slice() else {
                continue;
            };
            let r = self.matchups.get(id);
            let label = self.pair_label(r.first, r.second);

            if second - first < self.min_gap {
                violations.push(Violation::new(
                    ViolationType::Cooldown,
                    label.clone(),
                    format!(
                        "Rematch {label} in weeks {first} and {second} violates the {}-week cooldown",
                        self.min_gap
                    ),
                ));
            }

            if let Some(&other) = patterns.get(&(first, second)) {
                let o = self.matchups.get(other);
                violations.push(Violation::new(
                    ViolationType::PatternRepeat,
                    label.clone(),
                    format!(
                        "Rematch {label} repeats weeks ({first}, {second}) already used by {}",
                        self.pair_label(o.first, o.second)
                    ),
                ));
            } else {
                patterns.insert((first, second), id);
            }
        }
    }

    fn check_rivalry_week(&self, games: &[(u8, TeamId, TeamId)], violations: &mut Vec<Violation>) {
        let normalize = |a: TeamId, b: TeamId| if a < b { (a, b) } else { (b, a) };

        let expected: BTreeSet<(TeamId, TeamId)> = rivalry_pairings(self.roster)
            .into_iter()
            .map(|(a, b)| normalize(a, b))
            .collect();
        let actual: BTreeSet<(TeamId, TeamId)> = games
            .iter()
            .filter(|g| g.0 == RIVALRY_WEEK)
            .map(|&(_, a, b)| normalize(a, b))
            .collect();

        if expected != actual {
            violations.push(Violation::new(
                ViolationType::RivalryWeek,
                format!("week {RIVALRY_WEEK}"),
                format!(
                    "Week {RIVALRY_WEEK} matchups do not match the rivalry format (missing: {})",
                    expected
                        .difference(&actual)
                        .map(|&(a, b)| self.pair_label(a, b))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Assignment;
    use crate::scheduler::test_support::{sample_roster, solved_season};
    use crate::scheduler::{assign_rivalry_week, generate_matchups};

    fn kinds(violations: &[Violation]) -> Vec<ViolationType> {
        violations.iter().map(|v| v.violation_type.clone()).collect()
    }

    #[test]
    fn test_solved_schedule_is_valid() {
        let (roster, matchups, schedule) = solved_season();
        let violations = ScheduleValidator::new(&roster, &matchups, 2).validate(&schedule);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_incomplete_schedule() {
        let roster = sample_roster();
        let mut matchups = generate_matchups(&roster).unwrap();
        let rivalry = assign_rivalry_week(&roster, &mut matchups).unwrap();
        let state = crate::scheduler::SearchState::new(&matchups, &rivalry, 2);
        let schedule = state.to_schedule(&roster);

        let violations = ScheduleValidator::new(&roster, &matchups, 2).validate(&schedule);
        let found = kinds(&violations);
        assert!(found.contains(&ViolationType::WeeklyCoverage));
        assert!(found.contains(&ViolationType::Quota));
        assert!(!found.contains(&ViolationType::RivalryWeek));
    }

    #[test]
    fn test_swapped_weeks_break_rivalry() {
        let (roster, matchups, mut schedule) = solved_season();
        for a in &mut schedule.assignments {
            a.week = match a.week {
                14 => 1,
                1 => 14,
                w => w,
            };
        }

        let violations = ScheduleValidator::new(&roster, &matchups, 2).validate(&schedule);
        assert!(kinds(&violations).contains(&ViolationType::RivalryWeek));
    }

    #[test]
    fn test_cooldown_violation() {
        let (roster, matchups, schedule) = solved_season();
        // Any valid schedule breaks a cooldown far wider than the season allows.
        let violations = ScheduleValidator::new(&roster, &matchups, 12).validate(&schedule);
        assert!(kinds(&violations).contains(&ViolationType::Cooldown));
    }

    #[test]
    fn test_pattern_repeat_detected() {
        let (roster, matchups, mut schedule) = solved_season();
        // Relabel two teams so that their rematch week-pairs collide.
        let first = matchups
            .requirements()
            .iter()
            .position(|r| r.is_rematch())
            .unwrap();
        let r = matchups.get(first);
        let a = roster.team(r.first).name.clone();
        let b = roster.team(r.second).name.clone();
        let weeks = schedule.weeks_for_pair(&a, &b);

        // Duplicate the rematch's games under a second rematch pair's names
        // by rewriting the second pair's weeks to match.
        let second = matchups
            .requirements()
            .iter()
            .enumerate()
            .position(|(i, r)| i != first && r.is_rematch())
            .unwrap();
        let s = matchups.get(second);
        let c = roster.team(s.first).name.clone();
        let d = roster.team(s.second).name.clone();
        let mut idx = 0;
        for g in &mut schedule.assignments {
            if g.is_between(&c, &d) {
                g.week = weeks[idx];
                idx += 1;
            }
        }

        let violations = ScheduleValidator::new(&roster, &matchups, 2).validate(&schedule);
        assert!(kinds(&violations).contains(&ViolationType::PatternRepeat));
    }

    #[test]
    fn test_unknown_team() {
        let (roster, matchups, mut schedule) = solved_season();
        schedule.add_assignment(Assignment::new(3, "Ghosts", "Hawks"));

        let violations = ScheduleValidator::new(&roster, &matchups, 2).validate(&schedule);
        assert!(kinds(&violations).contains(&ViolationType::UnknownTeam));
    }

    #[test]
    fn test_week_out_of_range() {
        let (roster, matchups, mut schedule) = solved_season();
        schedule.assignments[0].week = 15;

        let violations = ScheduleValidator::new(&roster, &matchups, 2).validate(&schedule);
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::WeeklyCoverage && v.entity_id == "week 15"));
    }
}
