//! Data structures for a sports tournament: teams, matches, sports, tournament document.

mod game;
mod sport;
mod tournament;

pub use game::{GameMatch, Round, BYE, GROUP_A_WINNER, GROUP_B_WINNER};
pub use sport::{Sport, StandingsRule, StatCategory};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentType};
