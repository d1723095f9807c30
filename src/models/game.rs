//! Match (fixture) between two teams, and the Round it belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel opponent used while pairing an odd number of teams. Never stored.
pub const BYE: &str = "BYE";

/// Placeholder names for the final of a group + knockout tournament.
pub const GROUP_A_WINNER: &str = "Group A Winner";
pub const GROUP_B_WINNER: &str = "Group B Winner";

/// Round a match is played in: a numbered round, or the final.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    Number(u32),
    Final,
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Round::Number(n) => write!(f, "{}", n),
            Round::Final => write!(f, "Final"),
        }
    }
}

/// A single match between `team1` and `team2`, referenced by team name.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub team1: String,
    pub team2: String,
    /// None if not yet played.
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub round: Option<Round>,
    /// Group label ("A" / "B") for group + knockout tournaments.
    pub group: Option<String>,
}

impl GameMatch {
    pub fn new(team1: impl Into<String>, team2: impl Into<String>, round: Round) -> Self {
        Self {
            team1: team1.into(),
            team2: team2.into(),
            score1: None,
            score2: None,
            round: Some(round),
            group: None,
        }
    }

    /// Same match tagged with a group label.
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Both scores set: the match counts towards standings.
    pub fn is_played(&self) -> bool {
        self.score1.is_some() && self.score2.is_some()
    }

    /// True if either side is the BYE sentinel.
    pub fn involves_bye(&self) -> bool {
        self.team1 == BYE || self.team2 == BYE
    }

    /// True if the match is between `a` and `b`, in either order.
    pub fn pairs(&self, a: &str, b: &str) -> bool {
        (self.team1 == a && self.team2 == b) || (self.team1 == b && self.team2 == a)
    }
}
