//! Book endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::{
    error::{field_messages, AppError, AppResult},
    models::{Book, BookDto},
};

use super::{PathParam, ValidateRequest, ValidatedJson};

impl ValidateRequest for BookDto {
    fn validate_request(&self) -> AppResult<()> {
        self.validate()?;
        Ok(())
    }
}

/// Batch entries are reported as `[index].field: reason`
impl ValidateRequest for Vec<BookDto> {
    fn validate_request(&self) -> AppResult<()> {
        let errors: Vec<String> = self
            .iter()
            .enumerate()
            .filter_map(|(i, dto)| {
                dto.validate()
                    .err()
                    .map(|e| field_messages(&e, &format!("[{}].", i)))
            })
            .flatten()
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// An empty list is answered as absence
fn list_or_not_found(books: Vec<Book>) -> Response {
    if books.is_empty() {
        StatusCode::NOT_FOUND.into_response()
    } else {
        Json(books).into_response()
    }
}

/// List all books
#[utoipa::path(
    get,
    path = "/api/v1/books",
    tag = "books",
    responses(
        (status = 200, description = "Fetched list of books", body = Vec<Book>),
        (status = 404, description = "No books stored"),
        (status = 500, description = "Internal server error", body = ApiErrorDto)
    )
)]
pub async fn get_books(State(state): State<crate::AppState>) -> AppResult<Response> {
    let books = state.services.books.get_books().await?;
    Ok(list_or_not_found(books))
}

/// Get a single book
#[utoipa::path(
    get,
    path = "/api/v1/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Fetched single book", body = Book),
        (status = 404, description = "Book not found", body = ApiErrorDto)
    )
)]
pub async fn get_book_by_id(
    State(state): State<crate::AppState>,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_book_by_id(id).await?;
    Ok(Json(book))
}

/// Delete all books
#[utoipa::path(
    delete,
    path = "/api/v1/books",
    tag = "books",
    responses(
        (status = 200, description = "Deleted list of books", body = Vec<Book>),
        (status = 404, description = "No books stored")
    )
)]
pub async fn delete_books(State(state): State<crate::AppState>) -> AppResult<Response> {
    let books = state.services.books.delete_books().await?;
    Ok(list_or_not_found(books))
}

/// Delete a single book
#[utoipa::path(
    delete,
    path = "/api/v1/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Deleted single book", body = Book),
        (status = 404, description = "Book not found", body = ApiErrorDto)
    )
)]
pub async fn delete_book_by_id(
    State(state): State<crate::AppState>,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.delete_book_by_id(id).await?;
    Ok(Json(book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/api/v1/books",
    tag = "books",
    request_body = BookDto,
    responses(
        (status = 201, description = "Created book", body = Book),
        (status = 400, description = "Invalid book", body = ApiErrorDto),
        (status = 415, description = "Body is not JSON", body = ApiErrorDto)
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    ValidatedJson(dto): ValidatedJson<BookDto>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.books.add_book(dto).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Create several books at once
#[utoipa::path(
    post,
    path = "/api/v1/books/all",
    tag = "books",
    request_body = Vec<BookDto>,
    responses(
        (status = 201, description = "Created list of books", body = Vec<Book>),
        (status = 400, description = "Invalid book in batch", body = ApiErrorDto),
        (status = 415, description = "Body is not JSON", body = ApiErrorDto)
    )
)]
pub async fn add_books(
    State(state): State<crate::AppState>,
    ValidatedJson(dtos): ValidatedJson<Vec<BookDto>>,
) -> AppResult<(StatusCode, Json<Vec<Book>>)> {
    let books = state.services.books.add_books(dtos).await?;
    Ok((StatusCode::CREATED, Json(books)))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/api/v1/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = BookDto,
    responses(
        (status = 200, description = "Updated book", body = Book),
        (status = 400, description = "Invalid book", body = ApiErrorDto),
        (status = 404, description = "Book not found", body = ApiErrorDto),
        (status = 415, description = "Body is not JSON", body = ApiErrorDto)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    PathParam(id): PathParam<i64>,
    ValidatedJson(dto): ValidatedJson<BookDto>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.update_book(id, dto).await?;
    Ok(Json(book))
}
