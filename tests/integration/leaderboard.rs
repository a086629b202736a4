//! Leaderboard ranking over live store contents.

use std::sync::Arc;

use scorekeep::{InMemoryStore, LeaderboardEntry, LeaderboardQuery, Scoreboard};

fn board(entries: &[(&str, i64)]) -> Scoreboard<InMemoryStore> {
    let store = InMemoryStore::new();
    store.create_objective("kills").unwrap();
    for (name, score) in entries {
        store.add_participant("kills", name, *score).unwrap();
    }
    Scoreboard::new(Arc::new(store))
}

fn rows(board: &[LeaderboardEntry]) -> Vec<(usize, &str, i64)> {
    board
        .iter()
        .map(|e| (e.placement, e.name.as_str(), e.value))
        .collect()
}

#[tokio::test]
async fn test_top_three_with_tie() {
    let board = board(&[("A", 50), ("B", 80), ("C", 80), ("D", 10)]);
    let top = board.leaderboard("kills", 3).await.unwrap();
    assert_eq!(rows(&top), vec![(1, "B", 80), (2, "C", 80), (3, "A", 50)]);
}

#[tokio::test]
async fn test_zero_limit_is_empty() {
    let board = board(&[("A", 50), ("B", 80)]);
    assert!(board.leaderboard("kills", 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_limit_beyond_participants() {
    let board = board(&[("A", 50), ("B", 80)]);
    let top = board.leaderboard("kills", 25).await.unwrap();
    assert_eq!(rows(&top), vec![(1, "B", 80), (2, "A", 50)]);
}

#[tokio::test]
async fn test_default_query_is_ten_rows() {
    let entries: Vec<(String, i64)> = (0..12).map(|i| (format!("p{i:02}"), 100 - i)).collect();
    let refs: Vec<(&str, i64)> = entries.iter().map(|(n, s)| (n.as_str(), *s)).collect();
    let board = board(&refs);

    let top = board
        .leaderboard_with("kills", LeaderboardQuery::default())
        .await
        .unwrap();
    assert_eq!(top.len(), 10);
    assert_eq!(top.last().unwrap().name, "p09");
}

#[tokio::test]
async fn test_ranking_reflects_transfers() {
    let board = board(&[("A", 50), ("B", 80), ("C", 80)]);
    assert!(board.transfer("B", "A", "kills", 40).await);

    let top = board.leaderboard("kills", 3).await.unwrap();
    assert_eq!(rows(&top), vec![(1, "A", 90), (2, "C", 80), (3, "B", 40)]);
}

#[tokio::test]
async fn test_repeated_queries_are_identical() {
    let board = board(&[("A", 5), ("B", 5), ("C", 5)]);
    let first = board.leaderboard("kills", 10).await.unwrap();
    let second = board.leaderboard("kills", 10).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(board.list("kills").await.unwrap(), board.list("kills").await.unwrap());
}
