//! Books repository for database operations

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, BookSortBy, CreateBook, UpdateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: sqlx::Pool<sqlx::Postgres>,
}

impl BooksRepository {
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found.".to_string()))
    }

    /// Search the catalog with filters and pagination
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(12).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(ref search) = query.search {
            if !search.is_empty() {
                params.push(format!("%{}%", search));
                conditions.push(format!(
                    "(title ILIKE ${n} OR author ILIKE ${n})",
                    n = params.len()
                ));
            }
        }

        if let Some(ref genre) = query.genre {
            if !genre.is_empty() {
                params.push(format!("%{}%", genre));
                conditions.push(format!("genre ILIKE ${}", params.len()));
            }
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let order_by = match query.sort_by.unwrap_or_default() {
            BookSortBy::Oldest => "created_at ASC",
            BookSortBy::HighestRated => "rating DESC",
            BookSortBy::Available => "available_copies DESC",
            BookSortBy::Newest => "created_at DESC",
        };

        let select = format!(
            "SELECT * FROM books {} ORDER BY {} LIMIT {} OFFSET {}",
            where_clause, order_by, per_page, offset
        );

        let mut books_query = sqlx::query_as::<_, Book>(&select);
        for param in &params {
            books_query = books_query.bind(param);
        }
        let books = books_query.fetch_all(&self.pool).await?;

        let count = format!("SELECT COUNT(*) FROM books {}", where_clause);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count);
        for param in &params {
            count_query = count_query.bind(param);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        Ok((books, total))
    }

    /// Distinct genres in the catalog
    pub async fn genres(&self) -> AppResult<Vec<String>> {
        let genres =
            sqlx::query_scalar::<_, String>("SELECT DISTINCT genre FROM books ORDER BY genre")
                .fetch_all(&self.pool)
                .await?;
        Ok(genres)
    }

    /// All books, oldest first (admin listing)
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Insert a new book. All copies start available.
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, genre, rating, total_copies, available_copies,
                               description, summary, cover_url, cover_color, video_url)
            VALUES ($1, $2, $3, $4, $5, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.rating)
        .bind(book.total_copies)
        .bind(&book.description)
        .bind(&book.summary)
        .bind(&book.cover_url)
        .bind(&book.cover_color)
        .bind(&book.video_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Partial update. Shrinking total_copies clamps available_copies so the
    /// availability invariant keeps holding.
    pub async fn update(&self, id: Uuid, update: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET
                title = COALESCE($2, title),
                author = COALESCE($3, author),
                genre = COALESCE($4, genre),
                rating = COALESCE($5, rating),
                total_copies = COALESCE($6, total_copies),
                available_copies = LEAST(available_copies, COALESCE($6, total_copies)),
                description = COALESCE($7, description),
                summary = COALESCE($8, summary),
                cover_url = COALESCE($9, cover_url),
                cover_color = COALESCE($10, cover_color),
                video_url = COALESCE($11, video_url)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.author)
        .bind(&update.genre)
        .bind(update.rating)
        .bind(update.total_copies)
        .bind(&update.description)
        .bind(&update.summary)
        .bind(&update.cover_url)
        .bind(&update.cover_color)
        .bind(&update.video_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found.".to_string()))
    }

    /// Delete a book. Dependent borrow records cascade.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let affected = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(AppError::NotFound("Book not found.".to_string()));
        }
        Ok(())
    }
}
