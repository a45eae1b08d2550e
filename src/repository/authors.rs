//! Authors repository

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::Author};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert an author or overwrite the one with the same id
    pub async fn upsert(&self, author: &Author) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO authors (id, name, personal_name, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                personal_name = EXCLUDED.personal_name,
                updated_at = NOW()
            "#,
        )
        .bind(&author.id)
        .bind(&author.name)
        .bind(&author.personal_name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT id, name, personal_name FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(author)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
