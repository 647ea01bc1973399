//! Catalog API Endpoints
//! Mission: Book CRUD behind the auth gate, public listing and search

use crate::catalog::{
    models::{validate_book_fields, Book, BookSearchQuery, CreateBookRequest, UpdateBookRequest},
    store::BookStore,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Shared catalog state
#[derive(Clone)]
pub struct CatalogState {
    pub book_store: Arc<BookStore>,
}

impl CatalogState {
    pub fn new(book_store: Arc<BookStore>) -> Self {
        Self { book_store }
    }
}

/// Create book - POST /books
pub async fn create_book(
    State(state): State<CatalogState>,
    Json(payload): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<Book>), CatalogApiError> {
    if let Err(reason) =
        validate_book_fields(&payload.title, &payload.author, &payload.isbn, payload.price)
    {
        warn!("Rejected book payload: {}", reason);
        return Err(CatalogApiError::CreationFailed);
    }

    let book = state.book_store.create_book(&payload).map_err(|e| {
        warn!("Failed to create book {}: {}", payload.isbn, e);
        CatalogApiError::CreationFailed
    })?;

    Ok((StatusCode::CREATED, Json(book)))
}

/// List all books - GET /books
pub async fn list_books(
    State(state): State<CatalogState>,
) -> Result<Json<Vec<Book>>, CatalogApiError> {
    let books = state.book_store.list_books().map_err(|e| {
        warn!("Failed to list books: {}", e);
        CatalogApiError::ListFailed
    })?;

    Ok(Json(books))
}

/// Search books - GET /books/search?title=...&author=...
pub async fn search_books(
    State(state): State<CatalogState>,
    Query(query): Query<BookSearchQuery>,
) -> Result<Json<Vec<Book>>, CatalogApiError> {
    let books = state
        .book_store
        .search_books(query.title.as_deref(), query.author.as_deref())
        .map_err(|e| {
            warn!("Failed to search books: {}", e);
            CatalogApiError::SearchFailed
        })?;

    Ok(Json(books))
}

/// Update book - PUT /books/:id
pub async fn update_book(
    State(state): State<CatalogState>,
    Path(book_id): Path<String>,
    Json(payload): Json<UpdateBookRequest>,
) -> Result<Json<serde_json::Value>, CatalogApiError> {
    // An ID that parses as no UUID addresses no existing book
    let book_id = Uuid::parse_str(&book_id).map_err(|_| CatalogApiError::BookNotFound)?;

    if let Err(reason) =
        validate_book_fields(&payload.title, &payload.author, &payload.isbn, payload.price)
    {
        warn!("Rejected book update for {}: {}", book_id, reason);
        return Err(CatalogApiError::UpdateFailed);
    }

    let updated = state
        .book_store
        .update_book(&book_id, &payload)
        .map_err(|e| {
            warn!("Failed to update book {}: {}", book_id, e);
            CatalogApiError::UpdateFailed
        })?;

    if !updated {
        return Err(CatalogApiError::BookNotFound);
    }

    Ok(Json(json!({ "message": "Book updated successfully" })))
}

/// Delete book - DELETE /books/:id
pub async fn delete_book(
    State(state): State<CatalogState>,
    Path(book_id): Path<String>,
) -> Result<Json<serde_json::Value>, CatalogApiError> {
    let book_id = Uuid::parse_str(&book_id).map_err(|_| CatalogApiError::BookNotFound)?;

    let deleted = state.book_store.delete_book(&book_id).map_err(|e| {
        warn!("Failed to delete book {}: {}", book_id, e);
        CatalogApiError::DeletionFailed
    })?;

    if !deleted {
        return Err(CatalogApiError::BookNotFound);
    }

    Ok(Json(json!({ "message": "Book deleted successfully" })))
}

/// Catalog API errors
#[derive(Debug)]
pub enum CatalogApiError {
    BookNotFound,
    CreationFailed,
    ListFailed,
    SearchFailed,
    UpdateFailed,
    DeletionFailed,
}

impl IntoResponse for CatalogApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            CatalogApiError::BookNotFound => (StatusCode::NOT_FOUND, "Book not found"),
            CatalogApiError::CreationFailed => (StatusCode::BAD_REQUEST, "Failed to create book"),
            CatalogApiError::ListFailed => (StatusCode::BAD_REQUEST, "Failed to list books"),
            CatalogApiError::SearchFailed => (StatusCode::BAD_REQUEST, "Failed to search books"),
            CatalogApiError::UpdateFailed => (StatusCode::BAD_REQUEST, "Failed to update book"),
            CatalogApiError::DeletionFailed => (StatusCode::BAD_REQUEST, "Failed to delete book"),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_api_error_responses() {
        let not_found = CatalogApiError::BookNotFound.into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let creation = CatalogApiError::CreationFailed.into_response();
        assert_eq!(creation.status(), StatusCode::BAD_REQUEST);

        let update = CatalogApiError::UpdateFailed.into_response();
        assert_eq!(update.status(), StatusCode::BAD_REQUEST);
    }
}
