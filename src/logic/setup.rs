//! Fixture setup against a tournament: generate once, reset wholesale.

use crate::logic::schedule::generate_matches;
use crate::logic::standings::{compute_standings, TeamRecord};
use crate::models::{Tournament, TournamentError};
use rand::Rng;

/// Generate fixtures for the tournament's type and store them. Only valid while there are none.
pub fn generate_fixtures<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if !tournament.matches.is_empty() {
        return Err(TournamentError::FixturesAlreadyGenerated);
    }
    tournament.matches = generate_matches(tournament.kind, &tournament.teams, rng)?;
    Ok(())
}

/// Drop every fixture (and its score) so fixtures can be generated again.
pub fn reset_fixtures(tournament: &mut Tournament) {
    tournament.matches.clear();
}

/// Current table, using the sport's standings rule.
pub fn standings(tournament: &Tournament) -> Vec<TeamRecord> {
    compute_standings(
        &tournament.teams,
        &tournament.matches,
        tournament.sport.standings_rule(),
    )
}
