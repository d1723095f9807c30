//! Sport, its tracked stat categories and its standings rule.

use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a finished match is turned into points on the table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandingsRule {
    /// Win 3, draw 1. Scores feed for/against/goal difference.
    ScoreDifferential,
    /// Scores are set counts. Win 1, draw 0, no for/against.
    SetCount,
}

/// A named per-player counter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatCategory {
    Scorers,
    Assists,
    Runs,
    Wickets,
    Points,
    Sets,
}

impl StatCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatCategory::Scorers => "scorers",
            StatCategory::Assists => "assists",
            StatCategory::Runs => "runs",
            StatCategory::Wickets => "wickets",
            StatCategory::Points => "points",
            StatCategory::Sets => "sets",
        }
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatCategory {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scorers" => Ok(StatCategory::Scorers),
            "assists" => Ok(StatCategory::Assists),
            "runs" => Ok(StatCategory::Runs),
            "wickets" => Ok(StatCategory::Wickets),
            "points" => Ok(StatCategory::Points),
            "sets" => Ok(StatCategory::Sets),
            _ => Err(TournamentError::UnknownStatCategory(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    #[default]
    Football,
    Cricket,
    Basketball,
    Badminton,
}

impl Sport {
    /// Stat categories recorded for this sport, in display order.
    pub fn stat_categories(&self) -> &'static [StatCategory] {
        match self {
            Sport::Football => &[StatCategory::Scorers, StatCategory::Assists],
            Sport::Cricket => &[StatCategory::Runs, StatCategory::Wickets],
            Sport::Basketball => &[StatCategory::Points, StatCategory::Assists],
            Sport::Badminton => &[StatCategory::Sets],
        }
    }

    pub fn standings_rule(&self) -> StandingsRule {
        match self {
            Sport::Badminton => StandingsRule::SetCount,
            Sport::Football | Sport::Cricket | Sport::Basketball => StandingsRule::ScoreDifferential,
        }
    }

    pub fn tracks(&self, category: StatCategory) -> bool {
        self.stat_categories().contains(&category)
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sport::Football => "Football",
            Sport::Cricket => "Cricket",
            Sport::Basketball => "Basketball",
            Sport::Badminton => "Badminton",
        };
        f.write_str(label)
    }
}
