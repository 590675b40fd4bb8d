//! League season scheduling.
//!
//! Builds a 14-week schedule for a 12-team league split into 3 divisions
//! of 4. Divisional rivals meet twice, every other pair once, and the final
//! week is a fixed rivalry week pairing last season's 1st/2nd and 3rd/4th
//! finishers of each division.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Team`, `Roster`, `MatchupSet`, `Schedule`,
//!   `Assignment`, `Violation`
//! - **`validation`**: Roster integrity checks (team count, division sizes, ranks)
//! - **`scheduler`**: Matchup generation, rivalry week, backtracking search,
//!   restart controller, schedule validator
//! - **`ordering`**: Selectable search heuristics
//! - **`config`**: `SchedulerConfig`, loadable from TOML
//! - **`error`**: Error types
//!
//! # Example
//!
//! ```no_run
//! use season_schedule::{HeuristicController, Roster, SchedulerConfig};
//!
//! let roster = Roster::from_csv_file("teams.csv")?;
//! let config = SchedulerConfig::load("scheduler.toml")?;
//! let season = HeuristicController::new(config).generate(&roster)?;
//!
//! for (week, games) in season.schedule.week_map() {
//!     println!("week {week}: {games:?}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # References
//!
//! - de Werra (1981), "Scheduling in sports"
//! - Rasmussen & Trick (2008), "Round robin scheduling: a survey"

pub mod config;
pub mod error;
pub mod models;
pub mod ordering;
pub mod scheduler;
pub mod validation;

pub use config::SchedulerConfig;
pub use error::{RosterError, ScheduleError};
pub use models::{Roster, Schedule, Team};
pub use scheduler::{HeuristicController, Season};

/// Teams in the league.
pub const TOTAL_TEAMS: usize = 12;
/// Divisions in the league.
pub const TOTAL_DIVISIONS: usize = 3;
/// Teams per division.
pub const TEAMS_PER_DIVISION: usize = 4;
/// Weeks in a season.
pub const TOTAL_WEEKS: usize = 14;
/// Games played each week.
pub const GAMES_PER_WEEK: usize = TOTAL_TEAMS / 2;
/// The fixed rivalry week.
pub const RIVALRY_WEEK: u8 = 14;
/// Games in a season: 18 divisional pairs twice, 48 cross pairs once.
pub const TOTAL_GAMES: u32 = 84;
