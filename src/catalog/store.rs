//! Book Storage
//! Mission: Persist catalog records with SQLite

use crate::catalog::models::{Book, CreateBookRequest, UpdateBookRequest};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection};
use tracing::info;
use uuid::Uuid;

/// Book storage with SQLite backend
pub struct BookStore {
    db_path: String,
}

impl BookStore {
    /// Create a new book store and initialize database
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    /// Initialize database schema
    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS books (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                author TEXT NOT NULL,
                isbn TEXT UNIQUE NOT NULL,
                price REAL NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Create a new book
    ///
    /// Fails on a duplicate ISBN (UNIQUE constraint), leaving no new row.
    pub fn create_book(&self, req: &CreateBookRequest) -> Result<Book> {
        let book = Book {
            id: Uuid::new_v4(),
            title: req.title.clone(),
            description: req.description.clone(),
            author: req.author.clone(),
            isbn: req.isbn.clone(),
            price: req.price,
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO books (id, title, description, author, isbn, price, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                book.id.to_string(),
                book.title,
                book.description,
                book.author,
                book.isbn,
                book.price,
                book.created_at,
            ],
        )
        .context("Failed to insert book")?;

        info!("📕 Created book: {} ({})", book.title, book.isbn);

        Ok(book)
    }

    /// List all books
    pub fn list_books(&self) -> Result<Vec<Book>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, title, description, author, isbn, price, created_at
             FROM books ORDER BY created_at",
        )?;

        let books = stmt
            .query_map([], row_to_book)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(books)
    }

    /// Search books by exact-match fields
    ///
    /// Filters compose with AND; no filter at all degenerates to a full list.
    pub fn search_books(&self, title: Option<&str>, author: Option<&str>) -> Result<Vec<Book>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<String> = Vec::new();

        if let Some(title) = title {
            clauses.push("title = ?");
            values.push(title.to_string());
        }
        if let Some(author) = author {
            clauses.push("author = ?");
            values.push(author.to_string());
        }

        let sql = if clauses.is_empty() {
            "SELECT id, title, description, author, isbn, price, created_at
             FROM books ORDER BY created_at"
                .to_string()
        } else {
            format!(
                "SELECT id, title, description, author, isbn, price, created_at
                 FROM books WHERE {} ORDER BY created_at",
                clauses.join(" AND ")
            )
        };

        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(&sql)?;

        let books = stmt
            .query_map(params_from_iter(values.iter()), row_to_book)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(books)
    }

    /// Get a book by ID
    pub fn get_book(&self, book_id: &Uuid) -> Result<Option<Book>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, title, description, author, isbn, price, created_at
             FROM books WHERE id = ?1",
        )?;

        let book_result = stmt.query_row(params![book_id.to_string()], row_to_book);

        match book_result {
            Ok(book) => Ok(Some(book)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the updatable fields of a book
    ///
    /// Returns `false` if no book with that ID exists. Fails if the new ISBN
    /// collides with another record.
    pub fn update_book(&self, book_id: &Uuid, req: &UpdateBookRequest) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;

        let rows_affected = conn
            .execute(
                "UPDATE books
                 SET title = ?1, description = ?2, author = ?3, isbn = ?4, price = ?5
                 WHERE id = ?6",
                params![
                    req.title,
                    req.description,
                    req.author,
                    req.isbn,
                    req.price,
                    book_id.to_string(),
                ],
            )
            .context("Failed to update book")?;

        Ok(rows_affected > 0)
    }

    /// Delete a book by ID
    ///
    /// Returns `false` if no book with that ID exists.
    pub fn delete_book(&self, book_id: &Uuid) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;

        let rows_affected = conn.execute(
            "DELETE FROM books WHERE id = ?1",
            params![book_id.to_string()],
        )?;

        if rows_affected > 0 {
            info!("🗑️  Deleted book: {}", book_id);
        }

        Ok(rows_affected > 0)
    }
}

fn row_to_book(row: &rusqlite::Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        // ids are written by this store as canonical UUID strings
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
        title: row.get(1)?,
        description: row.get(2)?,
        author: row.get(3)?,
        isbn: row.get(4)?,
        price: row.get(5)?,
        created_at: row.get(6)?,
    })
}
