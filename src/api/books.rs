//! Catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book::{Book, BookQuery, CreateBook, Pagination, UpdateBook},
};

use super::{AuthenticatedUser, SuccessResponse};

/// Catalog page with pagination metadata
#[derive(Serialize, ToSchema)]
pub struct BookListResponse {
    pub books: Vec<Book>,
    pub pagination: Pagination,
}

/// List books with search, genre filter, sorting and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    params(BookQuery),
    responses(
        (status = 200, description = "Catalog page", body = BookListResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<BookListResponse>> {
    let (books, total_books) = state.services.catalog.search_books(&query).await?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(12).clamp(1, 100);
    let total_pages = (total_books + per_page - 1) / per_page;

    Ok(Json(BookListResponse {
        books,
        pagination: Pagination {
            page,
            per_page,
            total_books,
            total_pages,
            has_more: page < total_pages,
        },
    }))
}

/// Distinct genres in the catalog
#[utoipa::path(
    get,
    path = "/books/genres",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Genre list", body = Vec<String>)
    )
)]
pub async fn list_genres(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<String>>> {
    let genres = state.services.catalog.genres().await?;
    Ok(Json(genres))
}

/// Get book details
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// All books for the admin table
#[utoipa::path(
    get,
    path = "/admin/books",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All books", body = Vec<Book>),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn list_books_admin(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Book>>> {
    claims.require_admin()?;

    let books = state.services.catalog.list_all().await?;
    Ok(Json(books))
}

/// Create a new book (admin)
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    claims.require_admin()?;

    let created = state.services.catalog.create_book(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing book (admin)
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    claims.require_admin()?;

    let updated = state.services.catalog.update_book(id, update).await?;
    Ok(Json(updated))
}

/// Delete a book and its borrow records (admin)
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = SuccessResponse),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SuccessResponse>> {
    claims.require_admin()?;

    state.services.catalog.delete_book(id).await?;
    Ok(Json(SuccessResponse::ok()))
}
