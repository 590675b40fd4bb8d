//! League domain models.
//!
//! Provides the data types for describing a league season and its
//! solution.
//!
//! | Type | Role |
//! |------|------|
//! | `Team` | Roster entry: name, division, previous-season rank |
//! | `Roster` / `Division` | Validated league structure |
//! | `MatchupRequirement` / `MatchupSet` | Pairings the season must contain |
//! | `Schedule` / `Assignment` | Games placed in weeks |
//! | `Violation` | Post-hoc schedule check failure |

mod matchup;
mod roster;
mod schedule;
mod team;

pub use matchup::{MatchupKind, MatchupRequirement, MatchupSet, RequirementId};
pub use roster::{Division, Roster};
pub use schedule::{Assignment, Schedule, Violation, ViolationType};
pub use team::{Team, TeamId};
