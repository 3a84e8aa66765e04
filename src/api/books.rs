//! Catalog endpoints

use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook},
    AppState,
};

use super::{ActionResponse, ApiJson};

/// List all books
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/api/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 200, description = "Book added", body = ActionResponse),
        (status = 400, description = "Missing title or author", body = crate::error::FailureResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    WithRejection(Json(book), _): ApiJson<CreateBook>,
) -> AppResult<Json<ActionResponse>> {
    state.services.catalog.add_book(book).await?;
    Ok(ActionResponse::ok("Book added"))
}
