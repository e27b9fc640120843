//! In-process book repository

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BookRepository;
use crate::{
    error::{AppError, AppResult},
    models::{Book, NewBook},
};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Book>,
    last_id: i64,
}

impl Table {
    fn insert(&mut self, book: NewBook) -> Book {
        self.last_id += 1;
        let row = Book {
            id: self.last_id,
            title: book.title,
            author: book.author,
            price: book.price,
        };
        self.rows.insert(row.id, row.clone());
        row
    }
}

/// Book storage kept in memory; ids are never reused
#[derive(Default)]
pub struct InMemoryBookRepository {
    table: RwLock<Table>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn save(&self, book: NewBook) -> AppResult<Book> {
        Ok(self.table.write().await.insert(book))
    }

    async fn save_all(&self, books: Vec<NewBook>) -> AppResult<Vec<Book>> {
        let mut table = self.table.write().await;
        Ok(books.into_iter().map(|book| table.insert(book)).collect())
    }

    async fn update(&self, book: Book) -> AppResult<Book> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&book.id) {
            Some(row) => {
                *row = book.clone();
                Ok(book)
            }
            None => Err(AppError::BookNotFound(book.id)),
        }
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        self.table.write().await.rows.clear();
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn new_book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Martin Fowler".to_string(),
            price: Some(Decimal::new(5000, 2)),
        }
    }

    #[tokio::test]
    async fn save_assigns_increasing_ids() {
        let repo = InMemoryBookRepository::new();
        let first = repo.save(new_book("Refactoring")).await.unwrap();
        let second = repo.save(new_book("Patterns of Enterprise")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.find_all().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryBookRepository::new();
        repo.save(new_book("Refactoring")).await.unwrap();
        repo.delete_all().await.unwrap();
        let book = repo.save(new_book("Refactoring")).await.unwrap();
        assert_eq!(book.id, 2);
    }

    #[tokio::test]
    async fn update_missing_row_is_not_found() {
        let repo = InMemoryBookRepository::new();
        let book = Book {
            id: 42,
            title: "Refactoring".to_string(),
            author: "Martin Fowler".to_string(),
            price: Some(Decimal::new(5000, 2)),
        };
        assert!(matches!(
            repo.update(book).await,
            Err(AppError::BookNotFound(42))
        ));
    }

    #[tokio::test]
    async fn delete_by_id_removes_only_that_row() {
        let repo = InMemoryBookRepository::new();
        let saved = repo
            .save_all(vec![new_book("Refactoring"), new_book("Analysis Patterns")])
            .await
            .unwrap();
        repo.delete_by_id(saved[0].id).await.unwrap();

        assert!(repo.find_by_id(saved[0].id).await.unwrap().is_none());
        assert_eq!(repo.find_all().await.unwrap(), vec![saved[1].clone()]);
    }
}
