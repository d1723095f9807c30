//! Integration tests for the tournament store: targeted updates, atomic stat increments.

use std::sync::Arc;
use std::thread;
use tournament_maker::{
    generate_fixtures, stat_count, stat_leaders, MemoryStore, Sport, StatCategory, Tournament,
    TournamentError, TournamentStore, TournamentType,
};

fn football_store(teams: &[&str]) -> (Arc<MemoryStore>, tournament_maker::TournamentId) {
    let store = Arc::new(MemoryStore::new());
    let t = Tournament::with_teams("Cup", TournamentType::League, Sport::Football, teams.iter().copied())
        .unwrap();
    let id = store.create(t).unwrap();
    store
        .update(id, None, &mut |t| generate_fixtures(t, &mut rand::thread_rng()))
        .unwrap();
    (store, id)
}

#[test]
fn concurrent_increments_are_not_lost() {
    let (store, id) = football_store(&["A", "B"]);
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.increment_stat(id, StatCategory::Scorers, "Messi", 1))
        })
        .collect();
    for h in handles {
        h.join().unwrap().unwrap();
    }
    let t = store.get(id).unwrap();
    assert_eq!(stat_count(&t, StatCategory::Scorers, "Messi"), 2);
}

#[test]
fn many_concurrent_increments() {
    let (store, id) = football_store(&["A", "B"]);
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..25 {
                    let player = if i % 2 == 0 { "Kane" } else { "Son" };
                    store.increment_stat(id, StatCategory::Assists, player, 1).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    let t = store.get(id).unwrap();
    assert_eq!(
        stat_leaders(&t, StatCategory::Assists),
        vec![("Kane".to_string(), 100), ("Son".to_string(), 100)]
    );
}

#[test]
fn concurrent_score_updates_on_different_matches_both_land() {
    let (store, id) = football_store(&["A", "B", "C", "D"]);
    let handles: Vec<_> = (0..6)
        .map(|idx| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.set_score(id, idx, Some(idx as u32), Some(0)).map(|_| ()))
        })
        .collect();
    for h in handles {
        h.join().unwrap().unwrap();
    }
    let t = store.get(id).unwrap();
    for (idx, m) in t.matches.iter().enumerate() {
        assert_eq!((m.score1, m.score2), (Some(idx as u32), Some(0)));
    }
}

#[test]
fn out_of_range_score_update_is_rejected() {
    let (store, id) = football_store(&["A", "B"]);
    let before = store.get(id).unwrap();
    assert_eq!(
        store.set_score(id, 5, Some(1), Some(0)).unwrap_err(),
        TournamentError::MatchIndexOutOfRange { index: 5, len: 1 }
    );
    assert_eq!(store.get(id).unwrap().version, before.version);
}

#[test]
fn stat_category_must_match_sport() {
    let (store, id) = football_store(&["A", "B"]);
    assert!(matches!(
        store.increment_stat(id, StatCategory::Wickets, "Anderson", 1),
        Err(TournamentError::StatCategoryNotTracked { .. })
    ));
}

#[test]
fn stale_score_update_with_version_conflicts() {
    let (store, id) = football_store(&["A", "B", "C"]);
    let read = store.get(id).unwrap();
    store.set_score(id, 0, Some(1), Some(1)).unwrap();
    let err = store
        .update(id, Some(read.version), &mut |t| tournament_maker::set_score(t, 1, Some(2), Some(0)))
        .unwrap_err();
    assert_eq!(
        err,
        TournamentError::VersionConflict {
            expected: read.version,
            actual: read.version + 1,
        }
    );
    assert_eq!(store.get(id).unwrap().matches[1].score1, None);
}

#[test]
fn list_and_delete() {
    let store = MemoryStore::new();
    let a = store
        .create(Tournament::new("Zeta Cup", TournamentType::Knockout, Sport::Cricket).unwrap())
        .unwrap();
    store
        .create(Tournament::new("Alpha League", TournamentType::PremierLeague, Sport::Football).unwrap())
        .unwrap();
    let names: Vec<_> = store.list().unwrap().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Alpha League", "Zeta Cup"]);

    store.delete(a).unwrap();
    assert_eq!(store.len(), Ok(1));
    assert_eq!(store.delete(a), Err(TournamentError::TournamentNotFound(a)));
}
