//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookstore API",
        version = "1.0.0",
        description = "Book catalog REST API",
        license(name = "Apache 2.0", url = "https://www.apache.org/licenses/LICENSE-2.0")
    ),
    paths(
        // Books
        books::get_books,
        books::get_book_by_id,
        books::delete_books,
        books::delete_book_by_id,
        books::add_book,
        books::add_books,
        books::update_book,
        // Health
        health::health_check,
        health::readiness_check,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::BookDto,
            health::HealthResponse,
            crate::config::StorageBackend,
            crate::error::ApiErrorDto,
        )
    ),
    tags(
        (name = "books", description = "Book management"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/v3/api-docs", ApiDoc::openapi()))
}
