//! Books repository

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::Book};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a book or overwrite the one with the same id
    pub async fn upsert(&self, book: &Book) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO books (id, name, description, published_date,
                               cover_ids, author_ids, author_names, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                description = EXCLUDED.description,
                published_date = EXCLUDED.published_date,
                cover_ids = EXCLUDED.cover_ids,
                author_ids = EXCLUDED.author_ids,
                author_names = EXCLUDED.author_names,
                updated_at = NOW()
            "#,
        )
        .bind(&book.id)
        .bind(&book.name)
        .bind(&book.description)
        .bind(book.published_date)
        .bind(&book.cover_ids)
        .bind(&book.author_ids)
        .bind(&book.author_names)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, name, description, published_date,
                   cover_ids, author_ids, author_names
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
