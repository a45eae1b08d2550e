//! Ingestion services
//!
//! Each loader maps one dump line to one entity. [`run_phase`] drives a
//! loader over a whole dump, one line at a time, and collects the counters.

pub mod authors;
pub mod ingest;
pub mod works;

use async_trait::async_trait;
use tokio::io::AsyncBufRead;

use crate::{
    dump::DumpReader,
    error::{AppResult, LineError, LineOutcome},
    models::{Phase, PhaseReport},
};

pub use authors::AuthorLoader;
pub use ingest::{IngestState, Ingestor};
pub use works::WorkLoader;

/// A loader for one dump schema
#[async_trait]
pub trait DumpLoader: Send + Sync {
    fn phase(&self) -> Phase;

    /// Handle one raw line. `Err` is fatal for the whole run; malformed
    /// content is reported as [`LineOutcome::Skipped`].
    async fn process_line(&self, line: &str, report: &mut PhaseReport) -> AppResult<LineOutcome>;
}

/// Stream every line of `reader` through `loader`.
pub async fn run_phase<L, R>(
    loader: &L,
    reader: &mut DumpReader<R>,
    progress_interval: u64,
) -> AppResult<PhaseReport>
where
    L: DumpLoader + ?Sized,
    R: AsyncBufRead + Unpin,
{
    let phase = loader.phase();
    let mut report = PhaseReport::new(phase);

    tracing::info!(%phase, "Loading {}", reader.path().display());

    while let Some((line_number, line)) = reader.next_line().await? {
        report.lines_read += 1;

        let outcome = match line {
            Ok(line) => loader.process_line(&line, &mut report).await?,
            Err(reason) => LineOutcome::Skipped(reason),
        };

        match outcome {
            LineOutcome::Persisted => report.persisted += 1,
            LineOutcome::Skipped(reason) => {
                match reason {
                    LineError::Parse(_) => report.skipped_parse += 1,
                    LineError::MissingField(_) => report.skipped_missing_field += 1,
                }
                tracing::warn!(%phase, line = line_number, "Skipping line: {}", reason);
            }
        }

        if progress_interval > 0 && report.lines_read % progress_interval == 0 {
            tracing::info!(
                %phase,
                lines = report.lines_read,
                persisted = report.persisted,
                skipped = report.skipped(),
                "Progress"
            );
        }
    }

    tracing::info!(
        %phase,
        lines = report.lines_read,
        persisted = report.persisted,
        skipped_parse = report.skipped_parse,
        skipped_missing_field = report.skipped_missing_field,
        date_fallbacks = report.date_fallbacks,
        unresolved_authors = report.unresolved_authors,
        "Phase complete"
    );

    Ok(report)
}
