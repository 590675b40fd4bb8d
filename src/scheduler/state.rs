//! Mutable search state with O(1) place/undo.
//!
//! The state is an arena indexed by integer ids: outstanding demand and
//! placed weeks per requirement, a team bitmask per week, and a table of
//! reserved rematch week-pairs. Every placement is pushed onto an undo
//! log; [`SearchState::undo`] pops the latest entry and reverses exactly
//! what it changed. The frozen rivalry week is loaded at construction and
//! never appears in the log.

use crate::models::{Assignment, MatchupSet, RequirementId, Roster, Schedule, TeamId};
use crate::scheduler::rivalry::RivalryWeek;
use crate::{GAMES_PER_WEEK, TOTAL_TEAMS, TOTAL_WEEKS};

/// Week numbers are 1-based; slot 0 is unused.
const WEEK_SLOTS: usize = TOTAL_WEEKS + 1;

const FULL_WEEK: u16 = (1 << TOTAL_TEAMS) - 1;

#[inline]
fn bit(team: TeamId) -> u16 {
    1 << team
}

#[inline]
fn ordered(a: u8, b: u8) -> (usize, usize) {
    if a < b {
        (usize::from(a), usize::from(b))
    } else {
        (usize::from(b), usize::from(a))
    }
}

/// One undo-log entry.
#[derive(Debug, Clone, Copy)]
struct Placement {
    week: u8,
    requirement: RequirementId,
    reserved: Option<(usize, usize)>,
}

/// Search state for one attempt.
#[derive(Debug, Clone)]
pub struct SearchState<'a> {
    matchups: &'a MatchupSet,
    remaining: Vec<u8>,
    /// Weeks already holding each requirement; 0 marks an empty slot.
    placed: Vec<[u8; 2]>,
    week_mask: [u16; WEEK_SLOTS],
    week_games: Vec<Vec<RequirementId>>,
    reserved: [[bool; WEEK_SLOTS]; WEEK_SLOTS],
    log: Vec<Placement>,
    min_gap: u8,
}

impl<'a> SearchState<'a> {
    /// Creates a fresh state with the rivalry week already in place.
    ///
    /// Outstanding demand is read from `matchups`, which must already
    /// reflect the rivalry games.
    pub fn new(matchups: &'a MatchupSet, rivalry: &RivalryWeek, min_gap: u8) -> Self {
        let mut state = Self {
            matchups,
            remaining: matchups.requirements().iter().map(|r| r.remaining).collect(),
            placed: vec![[0; 2]; matchups.len()],
            week_mask: [0; WEEK_SLOTS],
            week_games: vec![Vec::with_capacity(GAMES_PER_WEEK); WEEK_SLOTS],
            reserved: [[false; WEEK_SLOTS]; WEEK_SLOTS],
            log: Vec::with_capacity(matchups.total_remaining() as usize),
            min_gap,
        };

        let week = usize::from(rivalry.week);
        for &id in &rivalry.games {
            let r = matchups.get(id);
            state.week_mask[week] |= bit(r.first) | bit(r.second);
            state.week_games[week].push(id);
            state.placed[id][0] = rivalry.week;
        }

        state
    }

    /// Outstanding occurrences of a requirement.
    #[inline]
    pub fn remaining(&self, id: RequirementId) -> u8 {
        self.remaining[id]
    }

    /// Bitmask of teams already playing in `week`.
    #[inline]
    pub fn week_mask(&self, week: u8) -> u16 {
        self.week_mask[usize::from(week)]
    }

    /// Whether the team still needs a game in `week`.
    #[inline]
    pub fn is_free(&self, week: u8, team: TeamId) -> bool {
        self.week_mask(week) & bit(team) == 0
    }

    /// Whether every team plays in `week`.
    #[inline]
    pub fn week_complete(&self, week: u8) -> bool {
        self.week_mask(week) == FULL_WEEK
    }

    /// Number of placements on the undo log.
    pub fn depth(&self) -> usize {
        self.log.len()
    }

    /// The requirement set the state was built from.
    pub fn matchups(&self) -> &'a MatchupSet {
        self.matchups
    }

    /// Whether placing `id` in `week` keeps every rule intact.
    ///
    /// Both teams must be free, demand must be outstanding, and a second
    /// meeting must respect the cooldown and use an unreserved week-pair.
    pub fn can_place(&self, week: u8, id: RequirementId) -> bool {
        let r = self.matchups.get(id);
        if self.week_mask(week) & (bit(r.first) | bit(r.second)) != 0 {
            return false;
        }
        if self.remaining[id] == 0 {
            return false;
        }
        match self.previous_week(id) {
            Some(prev) => self.second_meeting_allowed(prev, week),
            None => true,
        }
    }

    /// Legal opponents for `team` in `week`.
    pub fn options(&self, week: u8, team: TeamId) -> impl Iterator<Item = RequirementId> + '_ {
        (0..TOTAL_TEAMS)
            .filter(move |&other| other != team && self.is_free(week, other))
            .filter_map(move |other| self.matchups.find(team, other))
            .filter(move |&id| self.can_place(week, id))
    }

    /// Places one occurrence of `id` in `week`.
    ///
    /// The caller must have checked [`can_place`](Self::can_place).
    pub fn place(&mut self, week: u8, id: RequirementId) {
        debug_assert!(self.can_place(week, id));
        let r = self.matchups.get(id);
        let w = usize::from(week);

        let reserved = match self.previous_week(id) {
            Some(prev) => {
                let key = ordered(prev, week);
                self.reserved[key.0][key.1] = true;
                self.placed[id][1] = week;
                Some(key)
            }
            None => {
                self.placed[id][0] = week;
                None
            }
        };

        self.remaining[id] -= 1;
        self.week_mask[w] |= bit(r.first) | bit(r.second);
        self.week_games[w].push(id);
        self.log.push(Placement {
            week,
            requirement: id,
            reserved,
        });
    }

    /// Reverses the most recent placement.
    ///
    /// Returns the undone `(week, requirement)`, or `None` if the log is empty.
    pub fn undo(&mut self) -> Option<(u8, RequirementId)> {
        let entry = self.log.pop()?;
        let id = entry.requirement;
        let r = self.matchups.get(id);
        let w = usize::from(entry.week);

        match entry.reserved {
            Some((lo, hi)) => {
                self.reserved[lo][hi] = false;
                self.placed[id][1] = 0;
            }
            None => self.placed[id][0] = 0,
        }

        self.remaining[id] += 1;
        self.week_mask[w] &= !(bit(r.first) | bit(r.second));
        self.week_games[w].pop();
        Some((entry.week, id))
    }

    /// Necessary conditions for completing the open weeks.
    ///
    /// `open` lists the weeks not yet filled. Requires:
    /// - every connected component of the outstanding-demand graph has an
    ///   even number of teams (each week is a perfect matching);
    /// - every pair with one meeting left and one placed has an open week
    ///   satisfying cooldown and pattern rules;
    /// - every pair with two meetings left has two open weeks at least
    ///   the cooldown apart on an unreserved week-pair.
    pub fn lookahead(&self, open: &[u8]) -> bool {
        if !self.components_even() {
            return false;
        }

        for id in 0..self.remaining.len() {
            let ok = match (self.remaining[id], self.previous_week(id)) {
                (0, _) => true,
                (1, Some(prev)) => open
                    .iter()
                    .any(|&w| self.second_meeting_allowed(prev, w)),
                (1, None) => !open.is_empty(),
                (2, None) => open.iter().enumerate().any(|(i, &a)| {
                    open[i + 1..]
                        .iter()
                        .any(|&b| self.second_meeting_allowed(a, b))
                }),
                _ => false,
            };
            if !ok {
                return false;
            }
        }
        true
    }

    /// Converts the placed games into a named schedule.
    pub fn to_schedule(&self, roster: &Roster) -> Schedule {
        let mut schedule = Schedule::new();
        for week in 1..=TOTAL_WEEKS as u8 {
            for &id in &self.week_games[usize::from(week)] {
                let r = self.matchups.get(id);
                schedule.add_assignment(Assignment::new(
                    week,
                    roster.team(r.first).name.clone(),
                    roster.team(r.second).name.clone(),
                ));
            }
        }
        schedule
    }

    fn previous_week(&self, id: RequirementId) -> Option<u8> {
        match self.placed[id][0] {
            0 => None,
            week => Some(week),
        }
    }

    fn second_meeting_allowed(&self, a: u8, b: u8) -> bool {
        let (lo, hi) = ordered(a, b);
        hi - lo >= usize::from(self.min_gap) && !self.reserved[lo][hi]
    }

    fn components_even(&self) -> bool {
        let mut parent: [usize; TOTAL_TEAMS] = std::array::from_fn(|i| i);
        let mut has_edge = [false; TOTAL_TEAMS];

        fn root(parent: &mut [usize; TOTAL_TEAMS], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        for (id, r) in self.matchups.requirements().iter().enumerate() {
            if self.remaining[id] == 0 {
                continue;
            }
            has_edge[r.first] = true;
            has_edge[r.second] = true;
            let a = root(&mut parent, r.first);
            let b = root(&mut parent, r.second);
            if a != b {
                parent[a] = b;
            }
        }

        let mut size = [0usize; TOTAL_TEAMS];
        for team in 0..TOTAL_TEAMS {
            if has_edge[team] {
                size[root(&mut parent, team)] += 1;
            }
        }
        size.iter().all(|&n| n % 2 == 0)
    }
}
