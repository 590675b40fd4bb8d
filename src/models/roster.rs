//! Roster model.
//!
//! A roster is the validated, immutable league membership: 12 teams in
//! 3 divisions of 4, each team ranked 1..=4 within its division. Teams
//! keep their input order, which fixes the integer [`TeamId`] used by the
//! search engine. Divisions keep first-appearance order.
//!
//! Rosters can be built from a `Vec<Team>` (for instance deserialized from
//! JSON) or parsed from the tabular format:
//!
//! ```text
//! Team Name,Division Name,Previous Season Finish
//! Hawks,North,1
//! ...
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::{Team, TeamId};
use crate::error::RosterError;
use crate::validation::validate_roster;

const NAME_COLUMN: &str = "team_name";
const DIVISION_COLUMN: &str = "division_name";
const RANK_COLUMN: &str = "previous_season_finish";

/// A division and its members ordered by previous-season rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division {
    /// Division label.
    pub name: String,
    /// Member ids; index 0 holds the rank-1 team.
    pub teams: Vec<TeamId>,
}

impl Division {
    /// The team that finished at `rank` (1-based), if any.
    pub fn by_rank(&self, rank: u8) -> Option<TeamId> {
        let index = usize::from(rank).checked_sub(1)?;
        self.teams.get(index).copied()
    }

    /// Whether the division contains the team.
    pub fn contains(&self, team: TeamId) -> bool {
        self.teams.contains(&team)
    }
}

/// A validated league roster.
#[derive(Debug, Clone)]
pub struct Roster {
    teams: Vec<Team>,
    divisions: Vec<Division>,
    division_of: Vec<usize>,
}

impl Roster {
    /// Validates the teams and builds the roster.
    ///
    /// # Errors
    /// Returns [`RosterError::Invalid`] carrying every validation problem.
    pub fn new(teams: Vec<Team>) -> Result<Self, RosterError> {
        validate_roster(&teams).map_err(RosterError::Invalid)?;

        let mut divisions: Vec<Division> = Vec::new();
        let mut division_of = Vec::with_capacity(teams.len());
        for (id, team) in teams.iter().enumerate() {
            let index = match divisions.iter().position(|d| d.name == team.division) {
                Some(index) => index,
                None => {
                    divisions.push(Division {
                        name: team.division.clone(),
                        teams: Vec::new(),
                    });
                    divisions.len() - 1
                }
            };
            divisions[index].teams.push(id);
            division_of.push(index);
        }

        for division in &mut divisions {
            division.teams.sort_by_key(|&id| teams[id].rank);
        }

        Ok(Self {
            teams,
            divisions,
            division_of,
        })
    }

    /// Parses and validates a roster from CSV text.
    pub fn from_csv_str(text: &str) -> Result<Self, RosterError> {
        Self::from_csv_reader(text.as_bytes())
    }

    /// Parses and validates a roster from a CSV file.
    pub fn from_csv_file(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Parses and validates a roster from CSV data.
    ///
    /// Header names are trimmed, lower-cased, stripped of a byte-order mark,
    /// and have spaces replaced by underscores. Columns may appear in any
    /// order; extra columns are ignored. Quoted fields may contain commas.
    /// Blank lines are skipped.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, RosterError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();
        let find = |name: &str| columns.iter().position(|c| c == name);
        let (name_col, division_col, rank_col) =
            match (find(NAME_COLUMN), find(DIVISION_COLUMN), find(RANK_COLUMN)) {
                (Some(n), Some(d), Some(r)) => (n, d, r),
                _ => {
                    let missing: Vec<&str> = [NAME_COLUMN, DIVISION_COLUMN, RANK_COLUMN]
                        .into_iter()
                        .filter(|c| find(*c).is_none())
                        .collect();
                    return Err(RosterError::MissingColumns(missing.join(", ")));
                }
            };
        let width = name_col.max(division_col).max(rank_col) + 1;

        let mut teams = Vec::new();
        let mut record = StringRecord::new();
        while reader.read_record(&mut record)? {
            let line = record.position().map_or(0, |p| p.line() as usize);
            if record.len() < width {
                return Err(RosterError::MalformedRow {
                    line,
                    message: format!("expected at least {width} fields, found {}", record.len()),
                });
            }
            let rank = record[rank_col]
                .parse::<u8>()
                .map_err(|e| RosterError::MalformedRow {
                    line,
                    message: format!("invalid rank '{}': {e}", &record[rank_col]),
                })?;
            teams.push(Team::new(&record[name_col], &record[division_col], rank));
        }

        Self::new(teams)
    }

    /// All teams in input order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// The team with the given id.
    ///
    /// # Panics
    /// Panics if `id` is out of range.
    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id]
    }

    /// Looks up a team id by name.
    pub fn team_id(&self, name: &str) -> Option<TeamId> {
        self.teams.iter().position(|t| t.name == name)
    }

    /// All divisions in first-appearance order.
    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    /// Index into [`divisions`](Self::divisions) for a team.
    pub fn division_of(&self, id: TeamId) -> usize {
        self.division_of[id]
    }

    /// Whether two teams share a division.
    pub fn same_division(&self, a: TeamId, b: TeamId) -> bool {
        self.division_of[a] == self.division_of[b]
    }

    /// Number of teams.
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }
}

fn normalize_header(name: &str) -> String {
    name.trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    const CSV: &str = "\u{feff}Team Name, Division Name ,Previous Season Finish\n\
        Hawks,North,2\n\
        Bears,North,1\n\
        Wolves,North,4\n\
        Lions,North,3\n\
        \n\
        Sharks,South,1\n\
        Rays,South,2\n\
        Eels,South,3\n\
        Crabs,South,4\n\
        Elk,West,4\n\
        Owls,West,3\n\
        Foxes,West,2\n\
        Bison,West,1\n";

    #[test]
    fn test_from_csv() {
        let roster = Roster::from_csv_str(CSV).unwrap();
        assert_eq!(roster.team_count(), 12);
        assert_eq!(roster.divisions().len(), 3);

        let north = &roster.divisions()[0];
        assert_eq!(north.name, "North");
        let names: Vec<&str> = north
            .teams
            .iter()
            .map(|&id| roster.team(id).name.as_str())
            .collect();
        assert_eq!(names, vec!["Bears", "Hawks", "Lions", "Wolves"]);
        assert_eq!(north.by_rank(1), roster.team_id("Bears"));
        assert_eq!(north.by_rank(5), None);
        assert_eq!(north.by_rank(0), None);
    }

    #[test]
    fn test_division_lookup() {
        let roster = Roster::from_csv_str(CSV).unwrap();
        let hawks = roster.team_id("Hawks").unwrap();
        let bears = roster.team_id("Bears").unwrap();
        let bison = roster.team_id("Bison").unwrap();

        assert!(roster.same_division(hawks, bears));
        assert!(!roster.same_division(hawks, bison));
        assert_eq!(roster.division_of(bison), 2);
        assert!(roster.divisions()[2].contains(bison));
    }

    #[test]
    fn test_columns_in_any_order() {
        let csv = "previous_season_finish,team_name,notes,division_name\n\
            1,A1,x,A\n2,A2,x,A\n3,A3,x,A\n4,A4,x,A\n\
            1,B1,x,B\n2,B2,x,B\n3,B3,x,B\n4,B4,x,B\n\
            1,C1,x,C\n2,C2,x,C\n3,C3,x,C\n4,C4,x,C\n";
        let roster = Roster::from_csv_str(csv).unwrap();
        assert_eq!(roster.team(0).name, "A1");
        assert_eq!(roster.team(0).division, "A");
    }

    #[test]
    fn test_quoted_field_with_comma() {
        let csv = "Team Name,Division Name,Previous Season Finish\n\
            \"Smith, Jr.\",A,1\n\
            A2,A,2\nA3,A,3\nA4,A,4\n\
            B1,B,1\nB2,B,2\nB3,B,3\nB4,B,4\n\
            C1,C,1\nC2,C,2\n\"C3\",\"C\",\"3\"\nC4,C,4\n";
        let roster = Roster::from_csv_str(csv).unwrap();

        assert_eq!(roster.team(0).name, "Smith, Jr.");
        assert_eq!(roster.team(0).division, "A");
        assert_eq!(roster.team(0).rank, 1);
        assert_eq!(roster.team_id("C3"), Some(10));
        assert_eq!(roster.divisions()[0].by_rank(1), Some(0));
    }

    #[test]
    fn test_missing_column() {
        let err = Roster::from_csv_str("team_name,division_name\nA,B\n").unwrap_err();
        match err {
            RosterError::MissingColumns(cols) => assert_eq!(cols, "previous_season_finish"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            Roster::from_csv_str(""),
            Err(RosterError::MissingColumns(_))
        ));
    }

    #[test]
    fn test_bad_rank() {
        let csv = "team_name,division_name,previous_season_finish\nA,North,first\n";
        match Roster::from_csv_str(csv).unwrap_err() {
            RosterError::MalformedRow { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("first"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_row() {
        let csv = "team_name,division_name,previous_season_finish\nA,North\n";
        assert!(matches!(
            Roster::from_csv_str(csv),
            Err(RosterError::MalformedRow { line: 2, .. })
        ));
    }

    #[test]
    fn test_invalid_structure() {
        let csv = "team_name,division_name,previous_season_finish\nA,North,1\n";
        match Roster::from_csv_str(csv).unwrap_err() {
            RosterError::Invalid(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| e.kind == ValidationErrorKind::TeamCount));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_json_teams() {
        let json = r#"[
            {"name":"A1","division":"A","rank":1},{"name":"A2","division":"A","rank":2},
            {"name":"A3","division":"A","rank":3},{"name":"A4","division":"A","rank":4},
            {"name":"B1","division":"B","rank":1},{"name":"B2","division":"B","rank":2},
            {"name":"B3","division":"B","rank":3},{"name":"B4","division":"B","rank":4},
            {"name":"C1","division":"C","rank":1},{"name":"C2","division":"C","rank":2},
            {"name":"C3","division":"C","rank":3},{"name":"C4","division":"C","rank":4}
        ]"#;
        let teams: Vec<Team> = serde_json::from_str(json).unwrap();
        let roster = Roster::new(teams).unwrap();
        assert_eq!(roster.divisions()[1].name, "B");
    }
}
