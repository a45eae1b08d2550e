//! Persistence layer
//!
//! Loaders only see the [`CatalogStore`] trait. [`Repository`] backs it with
//! Postgres; [`memory::MemoryStore`] keeps everything in process.

pub mod authors;
pub mod books;
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Author, Book},
};

pub use memory::MemoryStore;

/// Keyed store for loaded entities. Upserts are idempotent by id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn upsert_author(&self, author: &Author) -> AppResult<()>;

    async fn upsert_book(&self, book: &Book) -> AppResult<()>;

    async fn find_author_by_id(&self, id: &str) -> AppResult<Option<Author>>;
}

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn upsert_author(&self, author: &Author) -> AppResult<()> {
        self.authors.upsert(author).await
    }

    async fn upsert_book(&self, book: &Book) -> AppResult<()> {
        self.books.upsert(book).await
    }

    async fn find_author_by_id(&self, id: &str) -> AppResult<Option<Author>> {
        self.authors.get_by_id(id).await
    }
}
