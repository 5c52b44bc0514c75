//! Catalog management service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
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

    /// Search books with filters
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        self.repository.books.search(query).await
    }

    /// Get book by ID
    pub async fn get_book(&self, id: Uuid) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Distinct genres present in the catalog
    pub async fn genres(&self) -> AppResult<Vec<String>> {
        self.repository.books.genres().await
    }

    /// All books for the admin table
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_all().await
    }

    /// Create a new book (admin). Every copy starts available.
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.books.create(&book).await
    }

    /// Update an existing book (admin)
    pub async fn update_book(&self, id: Uuid, update: UpdateBook) -> AppResult<Book> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.books.update(id, &update).await
    }

    /// Delete a book (admin); dependent borrow records cascade
    pub async fn delete_book(&self, id: Uuid) -> AppResult<()> {
        self.repository.books.delete(id).await
    }
}
