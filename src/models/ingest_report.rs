//! Counters collected while a dump is ingested

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Ingestion phase a report belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Authors,
    Works,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Authors => write!(f, "authors"),
            Phase::Works => write!(f, "works"),
        }
    }
}

/// Per-phase counters
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PhaseReport {
    pub phase: Phase,
    pub lines_read: u64,
    pub persisted: u64,
    pub skipped_parse: u64,
    pub skipped_missing_field: u64,
    /// Works whose `created` timestamp could not be parsed; the record was kept
    pub date_fallbacks: u64,
    /// Author references that resolved to the unknown-author placeholder
    pub unresolved_authors: u64,
}

impl PhaseReport {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            lines_read: 0,
            persisted: 0,
            skipped_parse: 0,
            skipped_missing_field: 0,
            date_fallbacks: 0,
            unresolved_authors: 0,
        }
    }

    pub fn skipped(&self) -> u64 {
        self.skipped_parse + self.skipped_missing_field
    }
}

/// Result of a complete run
#[derive(Debug, Clone, Serialize)]
pub struct IngestSummary {
    pub authors: PhaseReport,
    pub works: PhaseReport,
    #[serde(with = "duration_secs")]
    pub elapsed: Duration,
}

mod duration_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }
}
