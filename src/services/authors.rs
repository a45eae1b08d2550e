//! Author dump loader

use std::sync::Arc;

use async_trait::async_trait;

use super::DumpLoader;
use crate::{
    dump::parser::{opt_string, parse_record, strip_key_prefix, Record},
    error::{AppResult, LineOutcome},
    models::{author::AUTHOR_KEY_PREFIX, Author, Phase, PhaseReport},
    repository::CatalogStore,
};

/// Map an author record. Every field is optional; an absent `key` gives an
/// empty id.
pub fn author_from_record(record: &Record) -> Author {
    let key = opt_string(record, "key");
    Author {
        id: strip_key_prefix(&key, AUTHOR_KEY_PREFIX).to_string(),
        name: opt_string(record, "name"),
        personal_name: opt_string(record, "personal_name"),
    }
}

#[derive(Clone)]
pub struct AuthorLoader {
    store: Arc<dyn CatalogStore>,
}

impl AuthorLoader {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DumpLoader for AuthorLoader {
    fn phase(&self) -> Phase {
        Phase::Authors
    }

    async fn process_line(&self, line: &str, _report: &mut PhaseReport) -> AppResult<LineOutcome> {
        let record = match parse_record(line) {
            Ok(record) => record,
            Err(e) => return Ok(e.into()),
        };

        let author = author_from_record(&record);
        tracing::debug!(id = %author.id, "Saving author {}", author.name);
        self.store.upsert_author(&author).await?;

        Ok(LineOutcome::Persisted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dump::DumpReader,
        error::{AppError, LineError},
        repository::{MemoryStore, MockCatalogStore},
        services::run_phase,
    };

    #[test]
    fn test_author_from_record() {
        let record = parse_record(
            r#"{"key":"/authors/OL1A","name":"Mark Twain","personal_name":"Samuel Clemens"}"#,
        )
        .unwrap();

        assert_eq!(
            author_from_record(&record),
            Author {
                id: "OL1A".to_string(),
                name: "Mark Twain".to_string(),
                personal_name: "Samuel Clemens".to_string(),
            }
        );
    }

    #[test]
    fn test_author_missing_fields_default_to_empty() {
        let record = parse_record(r#"{"name":"Anonymous"}"#).unwrap();
        let author = author_from_record(&record);

        assert_eq!(author.id, "");
        assert_eq!(author.name, "Anonymous");
        assert_eq!(author.personal_name, "");
    }

    #[tokio::test]
    async fn test_malformed_line_does_not_stop_the_stream() {
        let store = Arc::new(MemoryStore::new());
        let loader = AuthorLoader::new(store.clone());
        let input: &[u8] = b"{\"key\":\"/authors/OL1A\",\"name\":\"Mark Twain\"}\n\
garbage\n\
{\"key\":\"/authors/OL2A\",\"name\":\"Jane Austen\"}\n";
        let mut reader = DumpReader::new("authors", input);

        let report = run_phase(&loader, &mut reader, 0).await.unwrap();

        assert_eq!(report.lines_read, 3);
        assert_eq!(report.persisted, 2);
        assert_eq!(report.skipped_parse, 1);
        let ids: Vec<String> = store.authors().await.into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["OL1A", "OL2A"]);
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_skipped() {
        let store = Arc::new(MemoryStore::new());
        let loader = AuthorLoader::new(store.clone());
        let input: &[u8] = b"{\"key\":\"/authors/OL1A\",\"name\":\"Mark Twain\"}\n\
{\"key\":\"/authors/OL2A\",\"name\":\"\xff\xfe\"}\n\
{\"key\":\"/authors/OL3A\",\"name\":\"Jane Austen\"}\n";
        let mut reader = DumpReader::new("authors", input);

        let report = run_phase(&loader, &mut reader, 0).await.unwrap();

        assert_eq!(report.lines_read, 3);
        assert_eq!(report.persisted, 2);
        assert_eq!(report.skipped_parse, 1);
        let ids: Vec<String> = store.authors().await.into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["OL1A", "OL3A"]);
    }

    #[tokio::test]
    async fn test_skipped_line_is_not_persisted() {
        let mut store = MockCatalogStore::new();
        store.expect_upsert_author().never();
        let loader = AuthorLoader::new(Arc::new(store));

        let outcome = loader
            .process_line("not json", &mut PhaseReport::new(Phase::Authors))
            .await
            .unwrap();

        assert!(matches!(outcome, LineOutcome::Skipped(LineError::Parse(_))));
    }

    #[tokio::test]
    async fn test_store_failure_is_fatal() {
        let mut store = MockCatalogStore::new();
        store
            .expect_upsert_author()
            .times(1)
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolClosed)));
        let loader = AuthorLoader::new(Arc::new(store));
        let input: &[u8] = b"{\"key\":\"/authors/OL1A\"}\n{\"key\":\"/authors/OL2A\"}\n";
        let mut reader = DumpReader::new("authors", input);

        let result = run_phase(&loader, &mut reader, 0).await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
