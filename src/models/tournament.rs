//! Tournament, TournamentType and TournamentError.

use crate::models::game::GameMatch;
use crate::models::sport::{Sport, StatCategory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Tournament name is blank.
    EmptyTournamentName,
    /// Team or player name is blank.
    EmptyName,
    /// A team with this name already exists in the tournament.
    DuplicateTeamName,
    TeamNotFound(String),
    /// A player with this name is already on the team's roster.
    DuplicatePlayerName,
    PlayerNotFound(String),
    /// Not enough teams for the requested tournament type.
    NotEnoughTeams { required: usize, actual: usize },
    /// Fixtures exist; reset them before generating again.
    FixturesAlreadyGenerated,
    MatchIndexOutOfRange { index: usize, len: usize },
    NegativeScore(i64),
    /// Score does not fit the engine's score range.
    ScoreTooLarge(i64),
    UnknownStatCategory(String),
    /// The category exists but the tournament's sport does not record it.
    StatCategoryNotTracked { category: StatCategory, sport: Sport },
    TournamentNotFound(TournamentId),
    /// Optimistic update lost: the tournament changed since it was read.
    VersionConflict { expected: u64, actual: u64 },
    /// The store could not be accessed (e.g. poisoned lock).
    StoreUnavailable,
}

impl fmt::Display for TournamentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentError::EmptyTournamentName => write!(f, "Tournament name must not be empty"),
            TournamentError::EmptyName => write!(f, "Name must not be empty"),
            TournamentError::DuplicateTeamName => write!(f, "A team with this name already exists"),
            TournamentError::TeamNotFound(name) => write!(f, "Team not found: {}", name),
            TournamentError::DuplicatePlayerName => {
                write!(f, "A player with this name is already on the team")
            }
            TournamentError::PlayerNotFound(name) => write!(f, "Player not found: {}", name),
            TournamentError::NotEnoughTeams { required, actual } => {
                write!(f, "Need at least {} teams (have {})", required, actual)
            }
            TournamentError::FixturesAlreadyGenerated => {
                write!(f, "Fixtures have already been generated")
            }
            TournamentError::MatchIndexOutOfRange { index, len } => {
                write!(f, "Match index {} out of range ({} matches)", index, len)
            }
            TournamentError::NegativeScore(v) => write!(f, "Score must not be negative (got {})", v),
            TournamentError::ScoreTooLarge(v) => {
                write!(f, "Score must be at most {} (got {})", u32::MAX, v)
            }
            TournamentError::UnknownStatCategory(name) => write!(f, "Unknown stat category: {}", name),
            TournamentError::StatCategoryNotTracked { category, sport } => {
                write!(f, "{} does not track {}", sport, category)
            }
            TournamentError::TournamentNotFound(id) => write!(f, "No tournament with id {}", id),
            TournamentError::VersionConflict { expected, actual } => write!(
                f,
                "Tournament was modified (expected version {}, found {})",
                expected, actual
            ),
            TournamentError::StoreUnavailable => write!(f, "Tournament store unavailable"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Format of the tournament; decides how fixtures are generated.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentType {
    #[default]
    League,
    /// Scheduled exactly like `League`; only the label differs.
    PremierLeague,
    Knockout,
    GroupAndKnockout,
}

impl TournamentType {
    /// Fewest teams fixtures can be generated for.
    pub fn min_teams(&self) -> usize {
        match self {
            TournamentType::GroupAndKnockout => 4,
            TournamentType::League | TournamentType::PremierLeague | TournamentType::Knockout => 2,
        }
    }
}

impl fmt::Display for TournamentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TournamentType::League => "League",
            TournamentType::PremierLeague => "Premier League",
            TournamentType::Knockout => "Knockout",
            TournamentType::GroupAndKnockout => "Group + Knockout",
        };
        f.write_str(label)
    }
}

/// Full tournament document: teams, rosters, fixtures and stat counters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TournamentType,
    pub sport: Sport,
    /// Team names in insertion (display) order.
    pub teams: Vec<String>,
    /// Roster per team name.
    pub players: HashMap<String, Vec<String>>,
    pub matches: Vec<GameMatch>,
    /// Per-category counters: player name -> count.
    pub stats: HashMap<StatCategory, HashMap<String, u32>>,
    pub created_at: DateTime<Utc>,
    /// Bumped by the store on every successful write.
    pub version: u64,
}

impl Tournament {
    /// Create an empty tournament. The name is trimmed and must not be empty.
    pub fn new(
        name: impl Into<String>,
        kind: TournamentType,
        sport: Sport,
    ) -> Result<Self, TournamentError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyTournamentName);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind,
            sport,
            teams: Vec::new(),
            players: HashMap::new(),
            matches: Vec::new(),
            stats: HashMap::new(),
            created_at: Utc::now(),
            version: 0,
        })
    }

    /// Create a tournament with initial teams (e.g. from a form). Fails on the first bad name.
    pub fn with_teams<I, S>(
        name: impl Into<String>,
        kind: TournamentType,
        sport: Sport,
        teams: I,
    ) -> Result<Self, TournamentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut t = Self::new(name, kind, sport)?;
        for team in teams {
            t.add_team(team)?;
        }
        Ok(t)
    }

    pub fn has_team(&self, name: &str) -> bool {
        self.teams.iter().any(|t| t == name)
    }

    /// Add a team. Names are trimmed and must be unique.
    pub fn add_team(&mut self, name: impl Into<String>) -> Result<(), TournamentError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if self.has_team(name) {
            return Err(TournamentError::DuplicateTeamName);
        }
        self.teams.push(name.to_string());
        self.players.insert(name.to_string(), Vec::new());
        Ok(())
    }

    /// Remove a team and its roster. Existing fixtures are left as they are.
    pub fn remove_team(&mut self, name: &str) -> Result<(), TournamentError> {
        let idx = self
            .teams
            .iter()
            .position(|t| t == name)
            .ok_or_else(|| TournamentError::TeamNotFound(name.to_string()))?;
        self.teams.remove(idx);
        self.players.remove(name);
        Ok(())
    }

    /// Roster of a team (empty slice if the team has no players yet).
    pub fn roster(&self, team: &str) -> Result<&[String], TournamentError> {
        if !self.has_team(team) {
            return Err(TournamentError::TeamNotFound(team.to_string()));
        }
        Ok(self.players.get(team).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Add a player to a team's roster. Names are trimmed and unique within the team.
    pub fn add_player(&mut self, team: &str, name: impl Into<String>) -> Result<(), TournamentError> {
        if !self.has_team(team) {
            return Err(TournamentError::TeamNotFound(team.to_string()));
        }
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        let roster = self.players.entry(team.to_string()).or_default();
        if roster.iter().any(|p| p == name) {
            return Err(TournamentError::DuplicatePlayerName);
        }
        roster.push(name.to_string());
        Ok(())
    }

    /// Remove a player from a team's roster. Their stat counters are kept.
    pub fn remove_player(&mut self, team: &str, name: &str) -> Result<(), TournamentError> {
        if !self.has_team(team) {
            return Err(TournamentError::TeamNotFound(team.to_string()));
        }
        let roster = self
            .players
            .get_mut(team)
            .ok_or_else(|| TournamentError::PlayerNotFound(name.to_string()))?;
        let idx = roster
            .iter()
            .position(|p| p == name)
            .ok_or_else(|| TournamentError::PlayerNotFound(name.to_string()))?;
        roster.remove(idx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn football(name: &str) -> Tournament {
        Tournament::new(name, TournamentType::League, Sport::Football).unwrap()
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(
            Tournament::new("   ", TournamentType::Knockout, Sport::Cricket),
            Err(TournamentError::EmptyTournamentName)
        ));
    }

    #[test]
    fn add_team_trims_and_rejects_duplicates() {
        let mut t = football("Cup");
        t.add_team(" Lions ").unwrap();
        assert_eq!(t.teams, vec!["Lions".to_string()]);
        assert_eq!(t.add_team("Lions"), Err(TournamentError::DuplicateTeamName));
        assert_eq!(t.add_team(""), Err(TournamentError::EmptyName));
        assert_eq!(t.teams.len(), 1);
    }

    #[test]
    fn teams_keep_insertion_order() {
        let t = Tournament::with_teams("Cup", TournamentType::League, Sport::Football, ["C", "A", "B"])
            .unwrap();
        assert_eq!(t.teams, vec!["C", "A", "B"]);
    }

    #[test]
    fn remove_team_drops_roster() {
        let mut t = football("Cup");
        t.add_team("Lions").unwrap();
        t.add_player("Lions", "Ann").unwrap();
        t.remove_team("Lions").unwrap();
        assert!(t.teams.is_empty());
        assert!(!t.players.contains_key("Lions"));
        assert_eq!(
            t.remove_team("Lions"),
            Err(TournamentError::TeamNotFound("Lions".to_string()))
        );
    }

    #[test]
    fn player_names_unique_per_team() {
        let mut t = football("Cup");
        t.add_team("Lions").unwrap();
        t.add_team("Tigers").unwrap();
        t.add_player("Lions", "Sam").unwrap();
        assert_eq!(t.add_player("Lions", "Sam"), Err(TournamentError::DuplicatePlayerName));
        t.add_player("Tigers", "Sam").unwrap();
        assert_eq!(t.roster("Lions").unwrap(), &["Sam".to_string()]);
        assert!(matches!(t.add_player("Bears", "Sam"), Err(TournamentError::TeamNotFound(_))));
    }

    #[test]
    fn remove_player() {
        let mut t = football("Cup");
        t.add_team("Lions").unwrap();
        t.add_player("Lions", "Sam").unwrap();
        assert!(matches!(t.remove_player("Lions", "Kim"), Err(TournamentError::PlayerNotFound(_))));
        t.remove_player("Lions", "Sam").unwrap();
        assert!(t.roster("Lions").unwrap().is_empty());
    }

    #[test]
    fn not_found_message_names_the_id() {
        let id = Uuid::new_v4();
        assert_eq!(
            TournamentError::TournamentNotFound(id).to_string(),
            format!("No tournament with id {}", id)
        );
    }

    #[test]
    fn group_and_knockout_needs_four() {
        assert_eq!(TournamentType::GroupAndKnockout.min_teams(), 4);
        assert_eq!(TournamentType::PremierLeague.min_teams(), 2);
    }
}
