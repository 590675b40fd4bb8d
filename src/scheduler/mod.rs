//! Season construction pipeline.
//!
//! roster → [`generate_matchups`] → [`assign_rivalry_week`] →
//! [`HeuristicController`] (repeated [`ScheduleBuilder`] attempts) →
//! [`ScheduleValidator`] → [`Season`].
//!
//! # Algorithm
//!
//! The final week is fixed from last season's standings. The remaining
//! 78 games are placed into weeks 1..=13 by a depth-first search that
//! treats each week as a perfect matching: pick the most constrained
//! team, try its legal opponents in order of outstanding demand, and undo
//! on dead ends. Rematches must be at least `min_rematch_gap` weeks apart
//! and no two rematches may share the same pair of weeks. A backtrack
//! ceiling detects thrashing, after which the controller restarts with a
//! new seed.
//!
//! # References
//!
//! - Golomb & Baumert (1965), "Backtrack Programming"
//! - Brélaz (1979), "New methods to color the vertices of a graph"
//!   (most-constrained-first selection)

mod builder;
mod controller;
mod generator;
mod rivalry;
mod state;
mod validator;

pub use builder::{AttemptOutcome, ScheduleBuilder};
pub use controller::{AttemptReport, HeuristicController, Season};
pub use generator::generate_matchups;
pub use rivalry::{assign_rivalry_week, rivalry_pairings, RivalryWeek};
pub use state::SearchState;
pub use validator::ScheduleValidator;

#[cfg(test)]
pub(crate) mod test_support {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::config::SchedulerConfig;
    use crate::models::{MatchupSet, Roster, Schedule, Team};

    pub fn sample_roster() -> Roster {
        Roster::new(vec![
            Team::new("Hawks", "North", 2),
            Team::new("Bears", "North", 1),
            Team::new("Wolves", "North", 4),
            Team::new("Lions", "North", 3),
            Team::new("Sharks", "South", 1),
            Team::new("Rays", "South", 2),
            Team::new("Eels", "South", 3),
            Team::new("Crabs", "South", 4),
            Team::new("Elk", "West", 4),
            Team::new("Owls", "West", 3),
            Team::new("Foxes", "West", 2),
            Team::new("Bison", "West", 1),
        ])
        .unwrap()
    }

    /// A roster, its matchups, and a schedule solved with a fixed seed.
    pub fn solved_season() -> (Roster, MatchupSet, Schedule) {
        let roster = sample_roster();
        let mut matchups = generate_matchups(&roster).unwrap();
        let rivalry = assign_rivalry_week(&roster, &mut matchups).unwrap();
        let config = SchedulerConfig::default().with_backtrack_limit(500_000);

        let schedule = (0..10)
            .find_map(|seed| {
                let mut builder =
                    ScheduleBuilder::new(&matchups, &rivalry, &config, StdRng::seed_from_u64(seed));
                (builder.run() == AttemptOutcome::Solved).then(|| builder.schedule(&roster))
            })
            .unwrap();

        (roster, matchups, schedule)
    }
}
