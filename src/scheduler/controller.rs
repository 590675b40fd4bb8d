//! Restart loop around the backtracking search.
//!
//! Each attempt gets a fresh [`ScheduleBuilder`] seeded with
//! `base_seed + (attempt - 1)`. Attempts that hit the backtrack limit or
//! exhaust the search space are discarded. The first solved attempt is
//! re-checked by [`ScheduleValidator`] before it is returned.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::builder::{AttemptOutcome, ScheduleBuilder};
use super::generator::generate_matchups;
use super::rivalry::assign_rivalry_week;
use super::validator::ScheduleValidator;
use crate::config::SchedulerConfig;
use crate::error::ScheduleError;
use crate::models::{Roster, Schedule};

/// Summary of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptReport {
    /// 1-based attempt number.
    pub attempt: usize,
    /// Seed used for the tie-breaker.
    pub seed: u64,
    pub outcome: AttemptOutcome,
    pub backtracks: u64,
    pub placements: u64,
}

/// A validated season and the attempts it took.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub schedule: Schedule,
    pub attempts: Vec<AttemptReport>,
}

impl Season {
    /// Number of attempts made, the successful one included.
    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }
}

/// Drives the full pipeline for one roster.
///
/// # Example
/// ```no_run
/// use season_schedule::config::SchedulerConfig;
/// use season_schedule::models::Roster;
/// use season_schedule::scheduler::HeuristicController;
///
/// let roster = Roster::from_csv_file("teams.csv").unwrap();
/// let controller = HeuristicController::new(SchedulerConfig::default().with_seed(7));
/// let season = controller.generate(&roster).unwrap();
/// println!("{}", season.schedule);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeuristicController {
    config: SchedulerConfig,
}

impl HeuristicController {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Generates a complete, validated season.
    ///
    /// # Errors
    /// - [`ScheduleError::Config`] for an invalid configuration
    /// - [`ScheduleError::MatchupCount`] / [`ScheduleError::RivalryPairMissing`]
    ///   if the roster cannot produce the required games
    /// - [`ScheduleError::AllAttemptsFailed`] when no attempt solved
    /// - [`ScheduleError::InvariantViolation`] when a solved schedule fails
    ///   validation; no further attempts are made
    pub fn generate(&self, roster: &Roster) -> Result<Season, ScheduleError> {
        self.config.validate()?;

        let mut matchups = generate_matchups(roster)?;
        let rivalry = assign_rivalry_week(roster, &mut matchups)?;

        let base_seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::rng().random::<u64>());
        info!(
            base_seed,
            max_attempts = self.config.max_attempts,
            backtrack_limit = self.config.backtrack_limit,
            "starting schedule search"
        );

        let mut reports = Vec::with_capacity(self.config.max_attempts);

        for attempt in 1..=self.config.max_attempts {
            let seed = base_seed.wrapping_add(attempt as u64 - 1);
            let rng = StdRng::seed_from_u64(seed);
            let mut builder = ScheduleBuilder::new(&matchups, &rivalry, &self.config, rng);
            let outcome = builder.run();

            reports.push(AttemptReport {
                attempt,
                seed,
                outcome,
                backtracks: builder.backtracks(),
                placements: builder.placements(),
            });
            debug!(
                attempt,
                seed,
                ?outcome,
                backtracks = builder.backtracks(),
                "attempt finished"
            );

            match outcome {
                AttemptOutcome::Solved => {
                    let schedule = builder.schedule(roster);
                    let violations =
                        ScheduleValidator::new(roster, &matchups, self.config.min_rematch_gap)
                            .validate(&schedule);
                    if !violations.is_empty() {
                        error!(
                            attempt,
                            violations = violations.len(),
                            "solved schedule failed validation"
                        );
                        return Err(ScheduleError::InvariantViolation(violations));
                    }

                    info!(attempt, games = schedule.assignment_count(), "schedule generated");
                    return Ok(Season {
                        schedule,
                        attempts: reports,
                    });
                }
                AttemptOutcome::BacktrackLimitReached => {
                    warn!(attempt, seed, "backtrack limit reached, restarting");
                }
                AttemptOutcome::Exhausted => {}
            }
        }

        let last_backtracks = reports.last().map_or(0, |r| r.backtracks);
        info!(
            attempts = reports.len(),
            last_backtracks, "no valid schedule found"
        );
        Err(ScheduleError::AllAttemptsFailed {
            attempts: reports.len(),
            last_backtracks,
            reports,
        })
    }
}
