//! Book model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Stored book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// Generated on insert, never changes afterwards
    pub id: i64,
    pub title: String,
    pub author: String,
    #[schema(value_type = Option<f64>, example = 599.99)]
    pub price: Option<Decimal>,
}

/// Book that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub price: Option<Decimal>,
}

/// Create/update book request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookDto {
    /// Book title
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(min = 10, max = 30, message = "size must be between 10 and 30")
    )]
    #[schema(example = "Harry Potter and the Goblet")]
    pub title: String,

    /// Author name
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(min = 5, max = 15, message = "size must be between 5 and 15")
    )]
    #[schema(example = "J.K. Rowling")]
    pub author: String,

    /// Book price, may be left out
    #[schema(value_type = Option<f64>, example = 599.99)]
    pub price: Option<Decimal>,
}

impl BookDto {
    pub fn new(title: impl Into<String>, author: impl Into<String>, price: Decimal) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            price: Some(price),
        }
    }
}

impl From<BookDto> for NewBook {
    fn from(dto: BookDto) -> Self {
        Self {
            title: dto.title,
            author: dto.author,
            price: dto.price,
        }
    }
}

impl Book {
    /// Overwrite the mutable fields, keeping the id
    pub fn apply(&mut self, changes: NewBook) {
        self.title = changes.title;
        self.author = changes.author;
        self.price = changes.price;
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::field_messages;

    fn price(cents: i64) -> Option<Decimal> {
        Some(Decimal::new(cents, 2))
    }

    #[test]
    fn dto_maps_to_new_book() {
        let dto = BookDto::new("Clean Code: A Handbook", "Robert C. Martin", Decimal::new(4000, 2));
        let book = NewBook::from(dto);
        assert_eq!(book.title, "Clean Code: A Handbook");
        assert_eq!(book.author, "Robert C. Martin");
        assert_eq!(book.price, price(4000));
    }

    #[test]
    fn short_title_fails_length_rule() {
        let dto = BookDto::new("Short", "Martin Fowler", Decimal::new(5000, 2));
        let errors = dto.validate().unwrap_err();
        assert_eq!(
            field_messages(&errors, ""),
            vec!["title: size must be between 10 and 30".to_string()]
        );
    }

    #[test]
    fn blank_author_reports_blank_and_size() {
        let dto = BookDto::new("Refactoring Databases", "", Decimal::new(5000, 2));
        let messages = field_messages(&dto.validate().unwrap_err(), "");
        assert!(messages.contains(&"author: must not be blank".to_string()));
        assert!(messages.contains(&"author: size must be between 5 and 15".to_string()));
    }

    #[test]
    fn missing_price_is_accepted() {
        let dto: BookDto =
            serde_json::from_str(r#"{"title": "Refactoring Databases", "author": "Scott Ambler"}"#)
                .unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(NewBook::from(dto).price, None);
    }

    #[test]
    fn apply_keeps_id() {
        let mut book = Book {
            id: 3,
            title: "Harry Potter".to_string(),
            author: "J.K. Rowling".to_string(),
            price: price(49999),
        };
        book.apply(NewBook {
            title: "Refactoring Databases".to_string(),
            author: "Scott Ambler".to_string(),
            price: price(5000),
        });
        assert_eq!(book.id, 3);
        assert_eq!(book.title, "Refactoring Databases");
        assert_eq!(book.price, price(5000));
    }

    #[test]
    fn price_serializes_as_number() {
        let book = Book {
            id: 1,
            title: "Harry Potter".to_string(),
            author: "J.K. Rowling".to_string(),
            price: price(4050),
        };
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["price"].as_f64(), Some(40.5));
    }

    #[test]
    fn missing_price_serializes_as_null() {
        let book = Book {
            id: 1,
            title: "Harry Potter".to_string(),
            author: "J.K. Rowling".to_string(),
            price: None,
        };
        let json = serde_json::to_value(&book).unwrap();
        assert!(json["price"].is_null());
    }
}
