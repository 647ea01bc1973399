//! Catalog Models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A book record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author: String,
    pub isbn: String, // unique business key
    pub price: f64,
    pub created_at: String,
}

/// Book creation request
#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub description: Option<String>,
    pub author: String,
    pub isbn: String,
    pub price: f64,
}

/// Book update request
///
/// Every updatable field is enumerated here; nothing else from the request
/// body ever reaches the stored record.
#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    pub title: String,
    pub description: Option<String>,
    pub author: String,
    pub isbn: String,
    pub price: f64,
}

/// Exact-match search parameters for GET /books/search
#[derive(Debug, Deserialize)]
pub struct BookSearchQuery {
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Shared field validation for create and update payloads.
///
/// Returns the reason a payload is invalid, for the server-side log only -
/// callers get the generic per-operation message.
pub fn validate_book_fields(
    title: &str,
    author: &str,
    isbn: &str,
    price: f64,
) -> Result<(), &'static str> {
    if title.trim().is_empty() {
        return Err("title must not be empty");
    }
    if author.trim().is_empty() {
        return Err("author must not be empty");
    }
    if isbn.trim().is_empty() {
        return Err("isbn must not be empty");
    }
    if price.is_nan() || price < 0.0 {
        return Err("price must be non-negative");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_book_fields() {
        assert!(validate_book_fields("Dune", "Frank Herbert", "9780441013593", 9.99).is_ok());
        assert!(validate_book_fields("Free Book", "Someone", "123", 0.0).is_ok());
    }

    #[test]
    fn test_invalid_book_fields() {
        assert!(validate_book_fields("", "Author", "123", 1.0).is_err());
        assert!(validate_book_fields("Title", "  ", "123", 1.0).is_err());
        assert!(validate_book_fields("Title", "Author", "", 1.0).is_err());
        assert!(validate_book_fields("Title", "Author", "123", -0.01).is_err());
        assert!(validate_book_fields("Title", "Author", "123", f64::NAN).is_err());
    }
}
