//! Catalog Loader - one-shot ingestion of author and work dumps.

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use catalog_loader::{
    config::AppConfig,
    logging::init_logging,
    repository::Repository,
    services::Ingestor,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(&config.logging)?;

    tracing::info!("Starting Catalog Loader v{}", env!("CARGO_PKG_VERSION"));

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    let repository = Repository::new(pool);
    let mut ingestor = Ingestor::new(
        Arc::new(repository.clone()),
        config.dumps.clone(),
        &config.ingest,
    );

    let summary = ingestor.run().await?;

    tracing::info!(
        authors_total = repository.authors.count().await?,
        books_total = repository.books.count().await?,
        "Store totals"
    );
    tracing::info!("Summary: {}", serde_json::to_string(&summary)?);

    repository.pool.close().await;
    Ok(())
}
