//! Scheduler configuration.
//!
//! Controls the restart loop and the search heuristics. Every field has a
//! default, so an empty TOML document is a valid configuration.
//!
//! ```
//! use season_schedule::config::SchedulerConfig;
//!
//! let config = SchedulerConfig::from_toml_str(r#"
//!     max_attempts = 5
//!     backtrack_limit = 100000
//!     seed = 42
//!     opponent_ordering = "shuffled"
//! "#).unwrap();
//!
//! assert_eq!(config.max_attempts, 5);
//! assert_eq!(config.seed, Some(42));
//! assert_eq!(config.min_rematch_gap, 2);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ordering::{OpponentOrdering, TeamSelection, WeekOrder};
use crate::TOTAL_WEEKS;

/// Default number of restarts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 20;
/// Default backtrack ceiling per attempt.
pub const DEFAULT_BACKTRACK_LIMIT: u64 = 5_000_000;
/// Default minimum week distance between the two meetings of a rematch.
pub const DEFAULT_MIN_REMATCH_GAP: u8 = 2;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for [`HeuristicController`](crate::scheduler::HeuristicController).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SchedulerConfig {
    /// Maximum number of search attempts.
    pub max_attempts: usize,
    /// Backtracks allowed per attempt before it is abandoned.
    pub backtrack_limit: u64,
    /// Base random seed; attempt `k` uses `seed + k`.
    ///
    /// `None` derives a base seed from the thread RNG.
    pub seed: Option<u64>,
    /// Minimum `|week₂ − week₁|` between two meetings of a pair.
    pub min_rematch_gap: u8,
    /// Team selection heuristic within a week.
    pub team_selection: TeamSelection,
    /// Opponent ordering heuristic.
    pub opponent_ordering: OpponentOrdering,
    /// Order in which weeks are filled.
    pub week_order: WeekOrder,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backtrack_limit: DEFAULT_BACKTRACK_LIMIT,
            seed: None,
            min_rematch_gap: DEFAULT_MIN_REMATCH_GAP,
            team_selection: TeamSelection::default(),
            opponent_ordering: OpponentOrdering::default(),
            week_order: WeekOrder::default(),
        }
    }
}

impl SchedulerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML, or
    /// fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the maximum attempt count.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the per-attempt backtrack limit.
    pub fn with_backtrack_limit(mut self, limit: u64) -> Self {
        self.backtrack_limit = limit;
        self
    }

    /// Sets the base random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the rematch cooldown.
    pub fn with_min_rematch_gap(mut self, gap: u8) -> Self {
        self.min_rematch_gap = gap;
        self
    }

    /// Sets the team selection heuristic.
    pub fn with_team_selection(mut self, selection: TeamSelection) -> Self {
        self.team_selection = selection;
        self
    }

    /// Sets the opponent ordering heuristic.
    pub fn with_opponent_ordering(mut self, ordering: OpponentOrdering) -> Self {
        self.opponent_ordering = ordering;
        self
    }

    /// Sets the week fill order.
    pub fn with_week_order(mut self, order: WeekOrder) -> Self {
        self.week_order = order;
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_attempts must be at least 1".into(),
            ));
        }
        if self.min_rematch_gap == 0 || usize::from(self.min_rematch_gap) >= TOTAL_WEEKS {
            return Err(ConfigError::Invalid(format!(
                "min_rematch_gap must lie in 1..{TOTAL_WEEKS}, got {}",
                self.min_rematch_gap
            )));
        }
        Ok(())
    }
}
