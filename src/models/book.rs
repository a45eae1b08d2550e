//! Book (literary work) model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Key prefix carried by work records in the dumps
pub const WORK_KEY_PREFIX: &str = "/works/";

/// Display name used when a referenced author has not been loaded
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Book as persisted, keyed by the prefix-stripped work key.
///
/// `author_names[i]` is the resolved name of `author_ids[i]`; both vectors
/// always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub cover_ids: Vec<String>,
    pub author_ids: Vec<String>,
    pub author_names: Vec<String>,
}
