//! Catalog service

use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all books
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Add a book to the catalog
    pub async fn add_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;

        let created = self.repository.books.create(&book).await?;
        tracing::info!("Added book {} \"{}\"", created.book_id, created.title);
        Ok(created)
    }
}
