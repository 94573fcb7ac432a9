use super::*;
use crate::{JsonFileStore, MemoryStore};
use highlight_protocols::MAX_HIGHLIGHT_CHARS;
use serde_json::json;

fn memory_repo() -> (Arc<MemoryStore>, HighlightRepository) {
    let store = Arc::new(MemoryStore::new());
    let repo = HighlightRepository::new(store.clone());
    (store, repo)
}

fn highlight(text: &str) -> Highlight {
    Highlight::new(text, "https://example.com/a", None)
}

#[tokio::test]
async fn test_list_initializes_store() {
    let (store, repo) = memory_repo();
    assert!(store.get(HIGHLIGHTS_KEY).await.unwrap().is_none());

    let highlights = repo.list().await.unwrap();
    assert!(highlights.is_empty());
    assert_eq!(store.get(HIGHLIGHTS_KEY).await.unwrap(), Some(json!([])));
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let (_store, repo) = memory_repo();
    repo.create(highlight("keep me")).await.unwrap();

    repo.initialize().await.unwrap();
    repo.initialize().await.unwrap();

    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_appends_at_end() {
    let (_store, repo) = memory_repo();
    let first = repo.create(highlight("first")).await.unwrap();
    let second = repo.create(highlight("second")).await.unwrap();
    let third = repo.create(highlight("third")).await.unwrap();

    let highlights = repo.list().await.unwrap();
    assert_eq!(highlights, vec![first, second, third]);
}

#[tokio::test]
async fn test_create_rejects_invalid_without_touching_store() {
    let (store, repo) = memory_repo();
    store.set_fail_reads(true);

    let mut empty_text = highlight("x");
    empty_text.text = "  ".to_string();
    assert!(repo.create(empty_text).await.unwrap_err().is_validation());

    let no_url = Highlight::new("text", "", None);
    assert!(repo.create(no_url).await.unwrap_err().is_validation());

    let too_long = highlight(&"a".repeat(highlight_protocols::MAX_HIGHLIGHT_CHARS + 1));
    assert!(repo.create(too_long).await.unwrap_err().is_validation());
}

#[tokio::test]
async fn test_create_trims_text_before_validating() {
    let (_store, repo) = memory_repo();

    let mut padded = highlight("x");
    padded.text = "  padded text \n".to_string();
    let stored = repo.create(padded).await.unwrap();
    assert_eq!(stored.text, "padded text");
    assert_eq!(repo.list().await.unwrap()[0].text, "padded text");

    let mut trailing = highlight("x");
    trailing.text = format!("{}{}", "a".repeat(10), " ".repeat(MAX_HIGHLIGHT_CHARS));
    let stored = repo.create(trailing).await.unwrap();
    assert_eq!(stored.text, "a".repeat(10));
}

#[tokio::test]
async fn test_create_assigns_missing_id() {
    let (_store, repo) = memory_repo();
    let mut h = highlight("no id");
    h.id = String::new();

    let stored = repo.create(h).await.unwrap();
    assert!(stored.id.starts_with("highlight_"));
}

#[tokio::test]
async fn test_create_rejects_duplicate_id() {
    let (_store, repo) = memory_repo();
    let h = highlight("once");
    repo.create(h.clone()).await.unwrap();

    let err = repo.create(h).await.unwrap_err();
    assert!(matches!(err, HighlightError::DuplicateId(_)));
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_write_failure_leaves_collection() {
    let (store, repo) = memory_repo();
    repo.create(highlight("existing")).await.unwrap();

    store.set_fail_writes(true);
    let err = repo.create(highlight("new")).await.unwrap_err();
    assert!(matches!(err, HighlightError::Storage(StoreError::Write(_))));

    store.set_fail_writes(false);
    let highlights = repo.list().await.unwrap();
    assert_eq!(highlights.len(), 1);
    assert_eq!(highlights[0].text, "existing");
}

#[tokio::test]
async fn test_create_read_failure() {
    let (store, repo) = memory_repo();
    store.set_fail_reads(true);
    let err = repo.create(highlight("new")).await.unwrap_err();
    assert!(matches!(err, HighlightError::Storage(StoreError::Read(_))));
}

#[tokio::test]
async fn test_delete_preserves_order() {
    let (_store, repo) = memory_repo();
    let a = repo.create(highlight("a")).await.unwrap();
    let b = repo.create(highlight("b")).await.unwrap();
    let c = repo.create(highlight("c")).await.unwrap();

    let removed = repo.delete_by_id(&b.id).await.unwrap();
    assert_eq!(removed, b);
    assert_eq!(repo.list().await.unwrap(), vec![a, c]);
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let (_store, repo) = memory_repo();
    let a = repo.create(highlight("a")).await.unwrap();
    let b = repo.create(highlight("b")).await.unwrap();

    repo.delete_by_id(&a.id).await.unwrap();
    let err = repo.delete_by_id(&a.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(repo.list().await.unwrap(), vec![b]);
}

#[tokio::test]
async fn test_delete_empty_id() {
    let (_store, repo) = memory_repo();
    let err = repo.delete_by_id("").await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_delete_storage_failure_is_distinct_from_not_found() {
    let (store, repo) = memory_repo();
    let a = repo.create(highlight("a")).await.unwrap();

    store.set_fail_writes(true);
    let err = repo.delete_by_id(&a.id).await.unwrap_err();
    assert!(matches!(err, HighlightError::Storage(_)));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_clear_then_list_is_empty() {
    let (_store, repo) = memory_repo();
    repo.create(highlight("a")).await.unwrap();
    repo.create(highlight("b")).await.unwrap();

    repo.clear().await.unwrap();
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_corrupt_collection_is_storage_error() {
    let (store, repo) = memory_repo();
    store.set(HIGHLIGHTS_KEY, json!({"not": "a list"})).await.unwrap();

    let err = repo.list().await.unwrap_err();
    assert!(matches!(err, HighlightError::Storage(StoreError::Serialization(_))));
}

#[tokio::test]
async fn test_concurrent_creates_are_not_lost() {
    let (_store, repo) = memory_repo();
    let repo = Arc::new(repo);

    let mut handles = Vec::new();
    for i in 0..20 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.create(highlight(&format!("item {}", i))).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(repo.list().await.unwrap().len(), 20);
}

#[tokio::test]
async fn test_file_backed_roundtrip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("highlights.json");

    let created = {
        let store = Arc::new(JsonFileStore::new(&path).await.unwrap());
        let repo = HighlightRepository::new(store);
        repo.create(highlight("Hello world")).await.unwrap()
    };

    let store = Arc::new(JsonFileStore::new(&path).await.unwrap());
    let repo = HighlightRepository::new(store);
    let highlights = repo.list().await.unwrap();
    assert_eq!(highlights, vec![created]);
    assert_eq!(repo.backend_id(), "file");
}

#[tokio::test]
async fn test_reads_records_written_by_other_clients() {
    let (store, repo) = memory_repo();
    store
        .set(
            HIGHLIGHTS_KEY,
            json!([{
                "id": "highlight_1700000000000",
                "text": "Saved elsewhere",
                "url": "https://example.com/b",
                "title": "Example",
                "timestamp": "2024-05-01T10:00:00.000Z"
            }]),
        )
        .await
        .unwrap();

    let highlights = repo.list().await.unwrap();
    assert_eq!(highlights[0].id, "highlight_1700000000000");
    assert_eq!(
        highlights[0].timestamp,
        "2024-05-01T10:00:00Z".parse::<chrono::DateTime<chrono::Utc>>().unwrap()
    );
}
