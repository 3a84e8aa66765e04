//! Books repository

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, BookStatus, CreateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List every book in insertion order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT book_id, title, author, cover_url, status FROM books ORDER BY book_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Insert a new book, always available
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, cover_url, status)
            VALUES ($1, $2, $3, $4)
            RETURNING book_id, title, author, cover_url, status
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.cover_url)
        .bind(BookStatus::Available)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
