//! PostgreSQL book repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::BookRepository;
use crate::{
    error::{AppError, AppResult},
    models::{Book, NewBook},
};

#[derive(Clone)]
pub struct PgBookRepository {
    pool: Pool<Postgres>,
}

impl PgBookRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT id, title, author, price FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, price FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn save(&self, book: NewBook) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, price)
            VALUES ($1, $2, $3)
            RETURNING id, title, author, price
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.price)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn save_all(&self, books: Vec<NewBook>) -> AppResult<Vec<Book>> {
        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(books.len());

        for book in books {
            let row = sqlx::query_as::<_, Book>(
                r#"
                INSERT INTO books (title, author, price)
                VALUES ($1, $2, $3)
                RETURNING id, title, author, price
                "#,
            )
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.price)
            .fetch_one(&mut *tx)
            .await?;
            saved.push(row);
        }

        tx.commit().await?;
        Ok(saved)
    }

    async fn update(&self, book: Book) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET title = $2, author = $3, price = $4
            WHERE id = $1
            RETURNING id, title, author, price
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.price)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::BookNotFound(book.id))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books").execute(&self.pool).await?;
        tracing::debug!("Deleted {} book rows", result.rows_affected());
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
