//! Recording match scores.

use crate::models::{Tournament, TournamentError};

/// Convert a raw score from the outside world; negative or oversized values are rejected.
pub fn validate_score(value: i64) -> Result<u32, TournamentError> {
    if value < 0 {
        return Err(TournamentError::NegativeScore(value));
    }
    u32::try_from(value).map_err(|_| TournamentError::ScoreTooLarge(value))
}

/// Set (or clear, with `None`) both scores of the match at `index`.
pub fn set_score(
    tournament: &mut Tournament,
    index: usize,
    score1: Option<u32>,
    score2: Option<u32>,
) -> Result<(), TournamentError> {
    let len = tournament.matches.len();
    let m = tournament
        .matches
        .get_mut(index)
        .ok_or(TournamentError::MatchIndexOutOfRange { index, len })?;
    m.score1 = score1;
    m.score2 = score2;
    Ok(())
}
