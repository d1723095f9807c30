//! Fixture generation: round-robin (circle method), first knockout round, and
//! two round-robin groups followed by a placeholder final.
//!
//! Pure functions over team names. Randomness only enters through the `rng`
//! argument, so a seeded generator gives a reproducible draw.

use crate::models::{
    GameMatch, Round, TournamentError, TournamentType, BYE, GROUP_A_WINNER, GROUP_B_WINNER,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Round-robin schedule: every team meets every other team exactly once.
///
/// 1. Odd count: append a BYE slot so everyone can be paired.
/// 2. For n slots, play n-1 rounds pairing slot i with slot n-1-i.
/// 3. After each round keep slot 0 fixed and move the last slot to position 1.
///
/// Matches against the BYE are skipped, so k teams always give k*(k-1)/2 matches.
pub fn round_robin(teams: &[String]) -> Vec<GameMatch> {
    let mut slots: Vec<&str> = teams.iter().map(String::as_str).collect();
    if slots.len() < 2 {
        return Vec::new();
    }
    if slots.len() % 2 == 1 {
        slots.push(BYE);
    }
    let n = slots.len();

    let mut matches = Vec::with_capacity(teams.len() * (teams.len() - 1) / 2);
    for round in 0..n - 1 {
        for i in 0..n / 2 {
            let (home, away) = (slots[i], slots[n - 1 - i]);
            if home == BYE || away == BYE {
                continue;
            }
            matches.push(GameMatch::new(home, away, Round::Number(round as u32 + 1)));
        }
        // Circle method: rotate everything except slot 0 one step to the right.
        slots[1..].rotate_right(1);
    }
    matches
}

/// First knockout round: shuffle, pad with BYE if odd, pair neighbours.
///
/// A team drawn against the BYE gets no match. Later rounds are not generated.
pub fn knockout<R: Rng + ?Sized>(teams: &[String], rng: &mut R) -> Vec<GameMatch> {
    let mut slots: Vec<&str> = teams.iter().map(String::as_str).collect();
    slots.shuffle(rng);
    if slots.len() % 2 == 1 {
        slots.push(BYE);
    }
    slots
        .chunks_exact(2)
        .filter(|pair| pair[0] != BYE && pair[1] != BYE)
        .map(|pair| GameMatch::new(pair[0], pair[1], Round::Number(1)))
        .collect()
}

/// Split shuffled teams into Group A (first half) and Group B (second half, gets the odd team).
pub fn split_groups<R: Rng + ?Sized>(teams: &[String], rng: &mut R) -> (Vec<String>, Vec<String>) {
    let mut shuffled = teams.to_vec();
    shuffled.shuffle(rng);
    let group_b = shuffled.split_off(shuffled.len() / 2);
    (shuffled, group_b)
}

/// Two independent round-robin groups plus one unscored "Group A Winner" vs
/// "Group B Winner" final. The final's teams are placeholders and are never
/// resolved here.
pub fn group_and_knockout<R: Rng + ?Sized>(
    teams: &[String],
    rng: &mut R,
) -> Result<Vec<GameMatch>, TournamentError> {
    let required = TournamentType::GroupAndKnockout.min_teams();
    if teams.len() < required {
        return Err(TournamentError::NotEnoughTeams {
            required,
            actual: teams.len(),
        });
    }

    let (group_a, group_b) = split_groups(teams, rng);
    let mut matches: Vec<GameMatch> = round_robin(&group_a)
        .into_iter()
        .map(|m| m.in_group("A"))
        .collect();
    matches.extend(round_robin(&group_b).into_iter().map(|m| m.in_group("B")));
    matches.push(GameMatch::new(GROUP_A_WINNER, GROUP_B_WINNER, Round::Final));
    Ok(matches)
}

/// Generate the full fixture list for a tournament type.
///
/// League and Premier League keep the given team order; knockout formats draw
/// with `rng`.
pub fn generate_matches<R: Rng + ?Sized>(
    kind: TournamentType,
    teams: &[String],
    rng: &mut R,
) -> Result<Vec<GameMatch>, TournamentError> {
    let required = kind.min_teams();
    if teams.len() < required {
        return Err(TournamentError::NotEnoughTeams {
            required,
            actual: teams.len(),
        });
    }

    let matches = match kind {
        TournamentType::League | TournamentType::PremierLeague => round_robin(teams),
        TournamentType::Knockout => knockout(teams, rng),
        TournamentType::GroupAndKnockout => group_and_knockout(teams, rng)?,
    };
    log::debug!("Generated {} {} fixture(s) for {} team(s)", matches.len(), kind, teams.len());
    Ok(matches)
}
