//! Tournament business logic: scheduling, standings, scores and player stats.

mod schedule;
mod scores;
mod setup;
mod standings;
mod stats;

pub use schedule::{generate_matches, group_and_knockout, knockout, round_robin, split_groups};
pub use scores::{set_score, validate_score};
pub use setup::{generate_fixtures, reset_fixtures, standings};
pub use standings::{compute_standings, standings_csv, TeamRecord};
pub use stats::{increment_stat, stat_count, stat_leaders};
