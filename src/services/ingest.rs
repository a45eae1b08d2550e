//! Ingestion orchestrator
//!
//! Authors are loaded to completion before the first work line is read, so
//! every author a work references is already in the store when its name is
//! resolved. There is no checkpointing: a rerun reads both dumps again and
//! overwrites by id.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use super::{run_phase, AuthorLoader, WorkLoader};
use crate::{
    config::{DumpConfig, IngestConfig},
    dump::DumpReader,
    error::{AppError, AppResult},
    models::{IngestSummary, PhaseReport},
    repository::CatalogStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestState {
    NotStarted,
    LoadingAuthors,
    LoadingWorks,
    Done,
    Failed,
}

impl fmt::Display for IngestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IngestState::NotStarted => "not_started",
            IngestState::LoadingAuthors => "loading_authors",
            IngestState::LoadingWorks => "loading_works",
            IngestState::Done => "done",
            IngestState::Failed => "failed",
        };
        f.write_str(s)
    }
}

pub struct Ingestor {
    store: Arc<dyn CatalogStore>,
    dumps: DumpConfig,
    progress_interval: u64,
    state: IngestState,
}

impl Ingestor {
    pub fn new(store: Arc<dyn CatalogStore>, dumps: DumpConfig, ingest: &IngestConfig) -> Self {
        Self {
            store,
            dumps,
            progress_interval: ingest.progress_interval,
            state: IngestState::NotStarted,
        }
    }

    pub fn state(&self) -> IngestState {
        self.state
    }

    /// Run both phases. Can only be called once per ingestor.
    pub async fn run(&mut self) -> AppResult<IngestSummary> {
        if self.state != IngestState::NotStarted {
            return Err(AppError::InvalidState(format!(
                "ingestion already ran (state: {})",
                self.state
            )));
        }

        let started = Instant::now();
        match self.run_phases().await {
            Ok((authors, works)) => {
                self.transition(IngestState::Done);
                let summary = IngestSummary {
                    authors,
                    works,
                    elapsed: started.elapsed(),
                };
                tracing::info!(
                    authors = summary.authors.persisted,
                    works = summary.works.persisted,
                    skipped = summary.authors.skipped() + summary.works.skipped(),
                    elapsed_secs = summary.elapsed.as_secs_f64(),
                    "Ingestion complete"
                );
                Ok(summary)
            }
            Err(e) => {
                tracing::error!(state = %self.state, "Ingestion failed: {}", e);
                self.transition(IngestState::Failed);
                Err(e)
            }
        }
    }

    async fn run_phases(&mut self) -> AppResult<(PhaseReport, PhaseReport)> {
        self.transition(IngestState::LoadingAuthors);
        let authors = {
            let mut reader = DumpReader::open(&self.dumps.authors).await?;
            let loader = AuthorLoader::new(self.store.clone());
            run_phase(&loader, &mut reader, self.progress_interval).await?
        };

        self.transition(IngestState::LoadingWorks);
        let works = {
            let mut reader = DumpReader::open(&self.dumps.works).await?;
            let loader = WorkLoader::new(self.store.clone());
            run_phase(&loader, &mut reader, self.progress_interval).await?
        };

        Ok((authors, works))
    }

    fn transition(&mut self, next: IngestState) {
        tracing::info!(from = %self.state, to = %next, "Ingestion state change");
        self.state = next;
    }
}
