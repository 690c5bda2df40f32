mod common;

use common::{memory, setup, setup_with_embedder, FailingProvider};
use memory_api::domain::entities::memory::Memory;
use memory_api::domain::error::DomainError;
use std::sync::Arc;

#[tokio::test]
async fn test_add_builds_index() {
    let t = setup();
    let outcome = t.api.add(memory("a", "cats are great pets")).await.unwrap();

    assert_eq!(outcome.memory_id, "a");
    assert_eq!(outcome.total_memories, 1);
    assert!(t.index_path.exists());
}

#[tokio::test]
async fn test_list_reflects_last_write() {
    let t = setup();
    t.api.add(memory("a", "first text")).await.unwrap();
    t.api.add(memory("b", "second text")).await.unwrap();
    let outcome = t.api.add(memory("a", "rewritten text")).await.unwrap();

    assert_eq!(outcome.total_memories, 2);
    assert_eq!(t.api.list_ids(), vec!["a", "b"]);

    // The rewritten text is what gets indexed and matched.
    let related = t.api.related("b", 1).await.unwrap();
    assert_eq!(related.related_ids, vec!["a"]);
}

#[tokio::test]
async fn test_bulk_add_counts() {
    let t = setup();
    t.api.add(memory("a", "already here")).await.unwrap();

    let outcome = t
        .api
        .bulk_add(vec![
            memory("b", "pickles are cucumbers"),
            memory("c", "coffee is a bean"),
            memory("a", "overwritten by bulk"),
        ])
        .await
        .unwrap();

    assert_eq!(outcome.added, 3);
    assert_eq!(outcome.total_memories, 3);
    assert_eq!(t.api.list_ids(), vec!["a", "b", "c"]);
    assert_eq!(t.api.status().total_memories, 3);
}

#[tokio::test]
async fn test_title_and_tags_are_accepted_and_ignored() {
    let t = setup();
    let m: Memory = serde_json::from_value(serde_json::json!({
        "id": "a",
        "text": "cats are great pets",
        "title": "Cats",
        "tags": ["Pets", "Animals"]
    }))
    .unwrap();
    assert_eq!(m.title.as_deref(), Some("Cats"));

    t.api.add(m).await.unwrap();
    assert_eq!(t.api.list_ids(), vec!["a"]);
}

#[tokio::test]
async fn test_rebuild_failure_keeps_store_update() {
    let t = setup_with_embedder(Arc::new(FailingProvider));

    let err = t.api.add(memory("a", "text")).await.unwrap_err();
    assert!(matches!(err, DomainError::IndexBuild(_)));
    assert_eq!(err.to_string(), "Index build failed: provider offline");

    assert_eq!(t.api.list_ids(), vec!["a"]);
    assert!(!t.index_path.exists());
}

#[tokio::test]
async fn test_empty_bulk_add() {
    let t = setup();
    let outcome = t.api.bulk_add(vec![]).await.unwrap();
    assert_eq!(outcome.added, 0);
    assert_eq!(outcome.total_memories, 0);
}
