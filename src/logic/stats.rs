//! Per-player stat counters (goals, assists, runs, ...).

use crate::models::{StatCategory, Tournament, TournamentError};

/// Add `amount` to a player's counter in `category`, creating it at zero first.
///
/// The category must be one the tournament's sport records.
pub fn increment_stat(
    tournament: &mut Tournament,
    category: StatCategory,
    player: &str,
    amount: u32,
) -> Result<u32, TournamentError> {
    if !tournament.sport.tracks(category) {
        return Err(TournamentError::StatCategoryNotTracked {
            category,
            sport: tournament.sport,
        });
    }
    let player = player.trim();
    if player.is_empty() {
        return Err(TournamentError::EmptyName);
    }
    let counter = tournament
        .stats
        .entry(category)
        .or_default()
        .entry(player.to_string())
        .or_insert(0);
    *counter = counter.saturating_add(amount);
    Ok(*counter)
}

/// Counter value for one player (0 if never incremented).
pub fn stat_count(tournament: &Tournament, category: StatCategory, player: &str) -> u32 {
    tournament
        .stats
        .get(&category)
        .and_then(|counters| counters.get(player))
        .copied()
        .unwrap_or(0)
}

/// Leaderboard for one category: highest count first, ties by player name.
pub fn stat_leaders(tournament: &Tournament, category: StatCategory) -> Vec<(String, u32)> {
    let mut leaders: Vec<(String, u32)> = tournament
        .stats
        .get(&category)
        .map(|counters| counters.iter().map(|(p, c)| (p.clone(), *c)).collect())
        .unwrap_or_default();
    leaders.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    leaders
}
