//! Sample data inserted at startup

use rust_decimal::Decimal;

use crate::{error::AppResult, models::BookDto, services::books::BookService};

fn sample_books() -> Vec<BookDto> {
    vec![
        BookDto::new("Harry Potter", "J.K. Rowling", Decimal::new(59999, 2)),
        BookDto::new("Pirates of the Caribbean", "Jonny Depp", Decimal::new(29999, 2)),
    ]
}

/// Insert the sample books in one batch
pub async fn seed_books(books: &BookService) -> AppResult<()> {
    let added = books.add_books(sample_books()).await?;
    if added.is_empty() {
        tracing::warn!("Books cannot be added: {:?}", added);
    } else {
        tracing::info!("Books added: {:?}", added);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::ValidateRequest, repository::InMemoryBookRepository};
    use std::sync::Arc;

    #[test]
    fn sample_books_pass_request_validation() {
        assert!(sample_books().validate_request().is_ok());
    }

    #[tokio::test]
    async fn seeding_inserts_two_books() {
        let service = BookService::new(Arc::new(InMemoryBookRepository::new()));
        seed_books(&service).await.unwrap();

        let books = service.get_books().await.unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "Harry Potter");
        assert_eq!(books[1].author, "Jonny Depp");
    }
}
