//! Book catalog service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookDto, NewBook},
    repository::BookRepository,
};

#[derive(Clone)]
pub struct BookService {
    repository: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    /// List every stored book; an empty store yields an empty list
    pub async fn get_books(&self) -> AppResult<Vec<Book>> {
        self.repository.find_all().await
    }

    pub async fn get_book_by_id(&self, id: i64) -> AppResult<Book> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::BookNotFound(id))
    }

    /// Delete every book and return what was stored beforehand.
    ///
    /// The snapshot and the delete are separate storage calls, so a book
    /// inserted in between is deleted without appearing in the result.
    pub async fn delete_books(&self) -> AppResult<Vec<Book>> {
        let books = self.get_books().await?;
        if !books.is_empty() {
            self.repository.delete_all().await?;
            tracing::info!("Deleted {} books", books.len());
        }
        Ok(books)
    }

    pub async fn delete_book_by_id(&self, id: i64) -> AppResult<Book> {
        let book = self.get_book_by_id(id).await?;
        self.repository.delete_by_id(id).await?;
        tracing::info!("Deleted book id={}", id);
        Ok(book)
    }

    pub async fn add_book(&self, dto: BookDto) -> AppResult<Book> {
        let book = self.repository.save(NewBook::from(dto)).await?;
        tracing::info!("Added book id={}", book.id);
        Ok(book)
    }

    /// Persist a batch in one storage call, keeping input order
    pub async fn add_books(&self, dtos: Vec<BookDto>) -> AppResult<Vec<Book>> {
        let books = dtos.into_iter().map(NewBook::from).collect();
        let saved = self.repository.save_all(books).await?;
        tracing::info!("Added {} books", saved.len());
        Ok(saved)
    }

    pub async fn update_book(&self, id: i64, dto: BookDto) -> AppResult<Book> {
        let changes = NewBook::from(dto);
        let mut book = self.get_book_by_id(id).await?;
        book.apply(changes);

        let book = self.repository.update(book).await?;
        tracing::info!("Updated book id={}", id);
        Ok(book)
    }

    /// Whether the storage backend currently answers
    pub async fn storage_ready(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
