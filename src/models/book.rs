//! Book (catalog entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Book model from database.
/// Invariant: `0 <= available_copies <= total_copies` (backed by a CHECK
/// constraint; every mutating statement preserves it).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub rating: i32,
    pub total_copies: i32,
    pub available_copies: i32,
    pub description: String,
    pub summary: String,
    pub cover_url: String,
    pub cover_color: String,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Short book representation embedded in borrow listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub cover_url: String,
    pub cover_color: String,
}

/// Catalog sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookSortBy {
    #[default]
    Newest,
    Oldest,
    HighestRated,
    Available,
}

/// Catalog query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Matches title or author, case-insensitively
    pub search: Option<String>,
    pub genre: Option<String>,
    pub sort_by: Option<BookSortBy>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Create book request (admin)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(range(min = 1, message = "Total copies must be at least 1"))]
    pub total_copies: i32,
    pub description: String,
    pub summary: String,
    pub cover_url: String,
    pub cover_color: String,
    pub video_url: Option<String>,
}

/// Update book request (admin); unset fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,
    #[validate(range(min = 1, message = "Total copies must be at least 1"))]
    pub total_copies: Option<i32>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub cover_url: Option<String>,
    pub cover_color: Option<String>,
    pub video_url: Option<String>,
}

/// Pagination envelope for catalog listings
#[derive(Debug, Serialize, ToSchema)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total_books: i64,
    pub total_pages: i64,
    pub has_more: bool,
}
