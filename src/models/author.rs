//! Author model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Key prefix carried by author records in the dumps
pub const AUTHOR_KEY_PREFIX: &str = "/authors/";

/// Author as persisted, keyed by the prefix-stripped dump key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub personal_name: String,
}
