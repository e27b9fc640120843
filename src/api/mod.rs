//! API handlers for the bookstore REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::request::Parts,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::{attach_request_path, AppError, AppResult},
    AppState,
};

/// Field-level checks run on a request body before it reaches a handler
pub trait ValidateRequest {
    fn validate_request(&self) -> AppResult<()>;
}

/// JSON body extractor that rejects malformed and invalid payloads
/// with the standard error envelope
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + ValidateRequest,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::MissingJsonContentType(e) => {
                    AppError::UnsupportedMediaType(e.body_text())
                }
                other => AppError::BadRequest(other.body_text()),
            })?;

        value.validate_request()?;
        Ok(ValidatedJson(value))
    }
}

/// Path parameter extractor answering unparsable segments with the
/// standard error envelope
pub struct PathParam<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParam<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(PathParam(value))
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        .route(
            "/books",
            get(books::get_books)
                .post(books::add_book)
                .delete(books::delete_books),
        )
        .route("/books/all", post(books::add_books))
        .route(
            "/books/:id",
            get(books::get_book_by_id)
                .put(books::update_book)
                .delete(books::delete_book_by_id),
        )
        .with_state(state.clone());

    // Health checks live outside the versioned API
    let health = Router::new()
        .route("/api/recommend/healthcheck", get(health::health_check))
        .route("/actuator/health", get(health::readiness_check))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(health)
        .merge(openapi)
        .layer(middleware::from_fn(attach_request_path))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
