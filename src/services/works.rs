//! Work dump loader
//!
//! Maps a work record to a [`Book`] and resolves each referenced author id
//! to the name of an author loaded in the previous phase.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use super::DumpLoader;
use crate::{
    dump::parser::{
        opt_array, opt_object, opt_string, parse_record, strip_key_prefix, value_to_string, Record,
    },
    error::{AppResult, LineError, LineOutcome},
    models::{
        author::AUTHOR_KEY_PREFIX,
        book::{UNKNOWN_AUTHOR, WORK_KEY_PREFIX},
        Book, Phase, PhaseReport,
    },
    repository::CatalogStore,
};

/// Layout of `created.value`, e.g. `2008-04-01T03:28:50.625462`
pub const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%6f";

/// Date part of a `created` timestamp
pub fn parse_created(value: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(value, CREATED_FORMAT)
        .ok()
        .map(|dt| dt.date())
}

/// Map a work record, leaving `author_names` empty.
///
/// Only a missing `key` rejects the record. A `created` timestamp that does
/// not parse leaves `published_date` unset and is counted in `report`.
pub fn book_from_record(record: &Record, report: &mut PhaseReport) -> Result<Book, LineError> {
    let key = record
        .get("key")
        .and_then(Value::as_str)
        .ok_or(LineError::MissingField("key"))?;

    let description = match record.get("description") {
        Some(Value::Object(obj)) => obj.get("value").and_then(Value::as_str).map(str::to_string),
        Some(Value::String(text)) => Some(text.clone()),
        _ => None,
    };

    let published_date = opt_object(record, "created").and_then(|created| {
        let raw = opt_string(created, "value");
        let date = parse_created(&raw);
        if date.is_none() {
            report.date_fallbacks += 1;
            tracing::debug!(key, created = %raw, "Unparsable created timestamp");
        }
        date
    });

    let cover_ids = opt_array(record, "covers")
        .map(|covers| {
            covers
                .iter()
                .filter(|cover| matches!(cover, Value::String(_) | Value::Number(_)))
                .map(value_to_string)
                .collect()
        })
        .unwrap_or_default();

    let author_ids = opt_array(record, "authors")
        .map(|authors| {
            authors
                .iter()
                .filter_map(|entry| {
                    let author_key = entry
                        .get("author")
                        .and_then(|author| author.get("key"))
                        .and_then(Value::as_str);
                    if author_key.is_none() {
                        tracing::debug!(key, "Author reference without author.key");
                    }
                    author_key.map(|k| strip_key_prefix(k, AUTHOR_KEY_PREFIX).to_string())
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Book {
        id: strip_key_prefix(key, WORK_KEY_PREFIX).to_string(),
        name: opt_string(record, "title"),
        description,
        published_date,
        cover_ids,
        author_ids,
        author_names: Vec::new(),
    })
}

#[derive(Clone)]
pub struct WorkLoader {
    store: Arc<dyn CatalogStore>,
}

impl WorkLoader {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// One lookup per id, in order; unknown ids map to [`UNKNOWN_AUTHOR`].
    pub async fn resolve_author_names(
        &self,
        author_ids: &[String],
        report: &mut PhaseReport,
    ) -> AppResult<Vec<String>> {
        let mut names = Vec::with_capacity(author_ids.len());
        for id in author_ids {
            match self.store.find_author_by_id(id).await? {
                Some(author) => names.push(author.name),
                None => {
                    report.unresolved_authors += 1;
                    names.push(UNKNOWN_AUTHOR.to_string());
                }
            }
        }
        Ok(names)
    }
}

#[async_trait]
impl DumpLoader for WorkLoader {
    fn phase(&self) -> Phase {
        Phase::Works
    }

    async fn process_line(&self, line: &str, report: &mut PhaseReport) -> AppResult<LineOutcome> {
        let record = match parse_record(line) {
            Ok(record) => record,
            Err(e) => return Ok(e.into()),
        };

        let mut book = match book_from_record(&record, report) {
            Ok(book) => book,
            Err(e) => return Ok(e.into()),
        };
        book.author_names = self.resolve_author_names(&book.author_ids, report).await?;

        tracing::debug!(id = %book.id, "Saving book {}", book.name);
        self.store.upsert_book(&book).await?;

        Ok(LineOutcome::Persisted)
    }
}
