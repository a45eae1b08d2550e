//! Data models for the catalog loader

pub mod author;
pub mod book;
pub mod ingest_report;

pub use author::Author;
pub use book::Book;
pub use ingest_report::{IngestSummary, Phase, PhaseReport};
