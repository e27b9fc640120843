//! Repository layer for book storage

pub mod books;
pub mod memory;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;

use crate::{
    config::{DatabaseConfig, StorageBackend},
    error::AppResult,
    models::{Book, NewBook},
};

pub use books::PgBookRepository;
pub use memory::InMemoryBookRepository;

/// Storage gateway for book records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books, ordered by id
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>>;

    /// Insert a book and return it with its generated id
    async fn save(&self, book: NewBook) -> AppResult<Book>;

    /// Insert a batch as a single unit; output keeps input order
    async fn save_all(&self, books: Vec<NewBook>) -> AppResult<Vec<Book>>;

    /// Overwrite title, author and price of an existing row
    async fn update(&self, book: Book) -> AppResult<Book>;

    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    async fn delete_all(&self) -> AppResult<()>;

    /// Check that the storage engine answers
    async fn ping(&self) -> AppResult<()>;
}

/// Open the configured storage backend, running migrations where needed
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn BookRepository>> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory book storage");
            Ok(Arc::new(InMemoryBookRepository::new()))
        }
        StorageBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .connect(&config.url)
                .await
                .context("failed to connect to database")?;

            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("failed to run database migrations")?;

            tracing::info!("Database migrations completed");

            Ok(Arc::new(PgBookRepository::new(pool)))
        }
    }
}
