//! Sports tournament maker: library with models, scheduling/standings logic and a tournament store.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    compute_standings, generate_fixtures, generate_matches, group_and_knockout, increment_stat,
    knockout, reset_fixtures, round_robin, set_score, split_groups, stat_count, stat_leaders,
    standings, standings_csv, validate_score, TeamRecord,
};
pub use models::{
    GameMatch, Round, Sport, StandingsRule, StatCategory, Tournament, TournamentError,
    TournamentId, TournamentType, BYE, GROUP_A_WINNER, GROUP_B_WINNER,
};
pub use store::{MemoryStore, Mutation, TournamentStore, TournamentSummary};
