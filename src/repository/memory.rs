//! In-process store with the same upsert semantics as the database

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::CatalogStore;
use crate::{
    error::AppResult,
    models::{Author, Book},
};

/// Keyed maps, insertion ordered; re-upserting an id keeps its position
#[derive(Debug, Default)]
pub struct MemoryStore {
    authors: RwLock<IndexMap<String, Author>>,
    books: RwLock<IndexMap<String, Book>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn authors(&self) -> Vec<Author> {
        self.authors.read().await.values().cloned().collect()
    }

    pub async fn books(&self) -> Vec<Book> {
        self.books.read().await.values().cloned().collect()
    }

    pub async fn find_book_by_id(&self, id: &str) -> Option<Book> {
        self.books.read().await.get(id).cloned()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn upsert_author(&self, author: &Author) -> AppResult<()> {
        self.authors
            .write()
            .await
            .insert(author.id.clone(), author.clone());
        Ok(())
    }

    async fn upsert_book(&self, book: &Book) -> AppResult<()> {
        self.books.write().await.insert(book.id.clone(), book.clone());
        Ok(())
    }

    async fn find_author_by_id(&self, id: &str) -> AppResult<Option<Author>> {
        Ok(self.authors.read().await.get(id).cloned())
    }
}
