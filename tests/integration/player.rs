//! Player-scoped and objective-scoped CRUD through the facade.

use std::sync::Arc;

use scorekeep::{InMemoryStore, ScoreItem, Scoreboard, ScoreboardError};

use crate::mock_store::{FaultyStore, WriteFault};

fn board() -> Scoreboard<InMemoryStore> {
    let store = InMemoryStore::new();
    store.create_objective("coins").unwrap();
    store.add_participant("coins", "Steve", 5).unwrap();
    store.add_participant("coins", "Alex", -3).unwrap();
    Scoreboard::new(Arc::new(store))
}

#[tokio::test]
async fn test_total_and_list() {
    let board = board();
    assert_eq!(board.total("coins").await.unwrap(), 2);
    assert_eq!(
        board.list("coins").await.unwrap(),
        vec![ScoreItem::new("Steve", 5), ScoreItem::new("Alex", -3)]
    );
}

#[tokio::test]
async fn test_all_data_serializes() {
    let board = board();
    let data = board.all_data("coins").await.unwrap();
    let json = serde_json::to_value(&data).unwrap();
    assert_eq!(json["total"], 2);
    assert_eq!(json["players"][0]["name"], "Steve");
    assert_eq!(json["players"][1]["value"], -3);
}

#[tokio::test]
async fn test_unknown_player_reads_zero() {
    let board = board();
    assert_eq!(board.player().get("Herobrine", "coins").await, 0);
    assert_eq!(board.player().get("Steve", "missing").await, 0);
}

#[tokio::test]
async fn test_set_add_remove_clear() {
    let board = board();
    let player = board.player();

    player.set("Steve", "coins", 40).await.unwrap();
    player.add("Steve", "coins", 2).await.unwrap();
    player.remove("Alex", "coins", 7).await.unwrap();
    assert_eq!(player.get("Steve", "coins").await, 42);
    assert_eq!(player.get("Alex", "coins").await, -10);

    player.clear("Alex", "coins").await.unwrap();
    assert_eq!(board.list("coins").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_write_to_unknown_player_fails_loudly() {
    let board = board();
    let err = board.player().add("Herobrine", "coins", 1).await.unwrap_err();
    assert_eq!(err, ScoreboardError::participant_not_found("Herobrine", "coins"));
}

#[tokio::test]
async fn test_duplicate_display_name_first_match_wins() {
    let store = Arc::new(InMemoryStore::new());
    store.create_objective("coins").unwrap();
    store.add_participant("coins", "Steve", 1).unwrap();
    store.add_participant("coins", "Steve", 2).unwrap();
    let board = Scoreboard::new(store);

    assert_eq!(board.player().get("Steve", "coins").await, 1);
    board.player().set("Steve", "coins", 10).await.unwrap();
    assert_eq!(
        board.list("coins").await.unwrap(),
        vec![ScoreItem::new("Steve", 10), ScoreItem::new("Steve", 2)]
    );
}

#[tokio::test]
async fn test_host_failure_reads_zero_but_writes_error() {
    let board = Scoreboard::new(Arc::new(FaultyStore::seeded("coins", &[("Steve", 9)])));
    board.store().inject(WriteFault::All);

    assert_eq!(board.player().get("Steve", "coins").await, 0);
    assert!(board.player().try_get("Steve", "coins").await.is_err());
    assert!(board.total("coins").await.is_err());
    assert!(board.player().set("Steve", "coins", 1).await.is_err());
    assert!(board.player().add("Steve", "coins", 1).await.is_err());

    board.store().heal();
    assert_eq!(board.player().get("Steve", "coins").await, 9);
}

#[tokio::test]
async fn test_clear_and_delete_objective() {
    let board = board();
    assert_eq!(board.clear("coins").await.unwrap(), 2);
    assert_eq!(board.total("coins").await.unwrap(), 0);

    assert!(board.delete("coins").await.unwrap());
    assert!(matches!(
        board.total("coins").await,
        Err(ScoreboardError::ObjectiveNotFound(_))
    ));
}
