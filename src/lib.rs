//! Catalog Loader
//!
//! Batch ingestion of line-delimited author and work dumps into a keyed
//! store. Authors are loaded first; works then resolve their author
//! references to display names against the loaded authors.

pub mod config;
pub mod dump;
pub mod error;
pub mod logging;
pub mod models;
pub mod repository;
pub mod services;

pub use crate::config::AppConfig;
pub use crate::error::{AppError, AppResult, LineError, LineOutcome};
