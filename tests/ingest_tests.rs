//! End-to-end ingestion over the fixture dumps

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;

use catalog_loader::{
    config::{DumpConfig, IngestConfig},
    models::{Author, Book},
    repository::MemoryStore,
    services::{IngestState, Ingestor},
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn dumps() -> DumpConfig {
    DumpConfig {
        authors: fixture("authors.txt"),
        works: fixture("works.txt"),
    }
}

async fn ingest(store: Arc<MemoryStore>) -> Ingestor {
    let mut ingestor = Ingestor::new(store, dumps(), &IngestConfig { progress_interval: 2 });
    ingestor.run().await.expect("ingestion should succeed");
    ingestor
}

#[tokio::test]
async fn test_authors_are_loaded_with_stripped_ids() {
    let store = Arc::new(MemoryStore::new());
    ingest(store.clone()).await;

    let authors = store.authors().await;
    let ids: Vec<&str> = authors.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["OL1A", "OL2A", "OL3A", "OL4A"]);

    assert_eq!(
        authors[0],
        Author {
            id: "OL1A".to_string(),
            name: "Mark Twain".to_string(),
            personal_name: "Samuel Clemens".to_string(),
        }
    );
    assert_eq!(authors[2].personal_name, "");
}

#[tokio::test]
async fn test_works_resolve_author_names() {
    let store = Arc::new(MemoryStore::new());
    ingest(store.clone()).await;

    let huck = store.find_book_by_id("OL1W").await.unwrap();
    assert_eq!(
        huck,
        Book {
            id: "OL1W".to_string(),
            name: "Adventures of Huckleberry Finn".to_string(),
            description: Some("A boy and a river.".to_string()),
            published_date: NaiveDate::from_ymd_opt(2009, 12, 11),
            cover_ids: vec!["101".to_string(), "102".to_string()],
            author_ids: vec!["OL1A".to_string()],
            author_names: vec!["Mark Twain".to_string()],
        }
    );

    let war = store.find_book_by_id("OL4W").await.unwrap();
    assert_eq!(war.cover_ids, vec!["7", "8"]);
    assert_eq!(war.author_ids, vec!["OL4A", "OL1A"]);
    assert_eq!(war.author_names, vec!["Leo Tolstoy", "Mark Twain"]);
}

#[tokio::test]
async fn test_unknown_author_placeholder() {
    let store = Arc::new(MemoryStore::new());
    ingest(store.clone()).await;

    let pride = store.find_book_by_id("OL2W").await.unwrap();
    assert_eq!(pride.author_ids, vec!["OL2A", "OL999A"]);
    assert_eq!(pride.author_names, vec!["Jane Austen", "Unknown Author"]);
    assert_eq!(pride.description.as_deref(), Some("Plain string description."));
}

#[tokio::test]
async fn test_names_stay_parallel_to_ids() {
    let store = Arc::new(MemoryStore::new());
    ingest(store.clone()).await;

    for book in store.books().await {
        assert_eq!(book.author_ids.len(), book.author_names.len(), "book {}", book.id);
    }
}

#[tokio::test]
async fn test_bad_lines_are_counted_and_skipped() {
    let store = Arc::new(MemoryStore::new());
    let mut ingestor = Ingestor::new(store.clone(), dumps(), &IngestConfig { progress_interval: 0 });

    let summary = ingestor.run().await.unwrap();

    assert_eq!(ingestor.state(), IngestState::Done);

    assert_eq!(summary.authors.lines_read, 6);
    assert_eq!(summary.authors.persisted, 4);
    assert_eq!(summary.authors.skipped_parse, 2);

    assert_eq!(summary.works.lines_read, 6);
    assert_eq!(summary.works.persisted, 4);
    assert_eq!(summary.works.skipped_parse, 1);
    assert_eq!(summary.works.skipped_missing_field, 1);
    assert_eq!(summary.works.date_fallbacks, 1);
    assert_eq!(summary.works.unresolved_authors, 1);

    let fragment = store.find_book_by_id("OL3W").await.unwrap();
    assert_eq!(fragment.name, "Untitled Fragment");
    assert_eq!(fragment.published_date, None);
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    ingest(store.clone()).await;
    let authors_first = store.authors().await;
    let books_first = store.books().await;

    ingest(store.clone()).await;

    assert_eq!(store.authors().await, authors_first);
    assert_eq!(store.books().await, books_first);
}
