//! Borrow records repository for database operations

use chrono::{NaiveDate, Utc};
use sqlx::Row;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookSummary,
        borrow::{BorrowDetails, BorrowRecord, BorrowRecordDetails, BorrowRecordStats},
    },
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: sqlx::Pool<sqlx::Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self { pool }
    }

    /// Get borrow record by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BorrowRecord> {
        sqlx::query_as::<_, BorrowRecord>("SELECT * FROM borrow_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Borrow record not found.".to_string()))
    }

    /// Count a user's outstanding loans
    pub async fn count_borrowed(&self, user_id: Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrow_records WHERE user_id = $1 AND status = 'BORROWED'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Reserve one copy and create the borrow record in a single transaction.
    /// The decrement is conditional on `available_copies > 0`, so two
    /// concurrent borrows of the last copy cannot both commit; the loser sees
    /// zero rows affected and the whole transaction rolls back.
    pub async fn create(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        due_date: NaiveDate,
    ) -> AppResult<BorrowRecord> {
        let mut tx = self.pool.begin().await?;

        let reserved = sqlx::query(
            "UPDATE books SET available_copies = available_copies - 1 \
             WHERE id = $1 AND available_copies > 0",
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if reserved == 0 {
            tx.rollback().await?;
            return Err(AppError::BusinessRule(
                "Book is not available for borrowing.".to_string(),
            ));
        }

        let record = sqlx::query_as::<_, BorrowRecord>(
            r#"
            INSERT INTO borrow_records (user_id, book_id, due_date, status)
            VALUES ($1, $2, $3, 'BORROWED')
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(due_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Flip a record to RETURNED and release its copy, atomically.
    /// The status condition doubles as the idempotence guard: a record that
    /// is already RETURNED affects zero rows and the call fails without
    /// touching availability.
    pub async fn mark_returned(&self, record_id: Uuid, book_id: Uuid) -> AppResult<()> {
        let today = Utc::now().date_naive();
        let mut tx = self.pool.begin().await?;

        let flipped = sqlx::query(
            "UPDATE borrow_records SET status = 'RETURNED', return_date = $2 \
             WHERE id = $1 AND status = 'BORROWED'",
        )
        .bind(record_id)
        .bind(today)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if flipped == 0 {
            tx.rollback().await?;
            return Err(AppError::Conflict("Book already returned.".to_string()));
        }

        // Guarded by total_copies; a concurrently deleted or already-full
        // book skips the increment silently.
        sqlx::query(
            "UPDATE books SET available_copies = available_copies + 1 \
             WHERE id = $1 AND available_copies < total_copies",
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// A user's borrow records with book summaries, oldest first
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<BorrowDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.borrow_date, r.due_date, r.return_date, r.status,
                   b.id as book_id, b.title, b.author, b.genre, b.cover_url, b.cover_color
            FROM borrow_records r
            JOIN books b ON r.book_id = b.id
            WHERE r.user_id = $1
            ORDER BY r.borrow_date
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::new();
        for row in rows {
            let status: String = row.get("status");
            result.push(BorrowDetails {
                id: row.get("id"),
                borrow_date: row.get("borrow_date"),
                due_date: row.get("due_date"),
                return_date: row.get("return_date"),
                status: status
                    .parse()
                    .map_err(|e: String| AppError::Internal(e))?,
                book: BookSummary {
                    id: row.get("book_id"),
                    title: row.get("title"),
                    author: row.get("author"),
                    genre: row.get("genre"),
                    cover_url: row.get("cover_url"),
                    cover_color: row.get("cover_color"),
                },
            });
        }

        Ok(result)
    }

    /// Every borrow record with user/book context, newest first (admin view)
    pub async fn list_all(&self) -> AppResult<Vec<BorrowRecordDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.borrow_date, r.due_date, r.return_date, r.status,
                   u.full_name as user_name, u.email as user_email,
                   b.title as book_title, b.author as book_author
            FROM borrow_records r
            JOIN users u ON r.user_id = u.id
            JOIN books b ON r.book_id = b.id
            ORDER BY r.borrow_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let today = Utc::now().date_naive();

        let mut result = Vec::new();
        for row in rows {
            let status: String = row.get("status");
            let status = status
                .parse::<crate::models::BorrowStatus>()
                .map_err(AppError::Internal)?;
            let due_date: NaiveDate = row.get("due_date");
            result.push(BorrowRecordDetails {
                id: row.get("id"),
                borrow_date: row.get("borrow_date"),
                due_date,
                return_date: row.get("return_date"),
                status,
                user_name: row.get("user_name"),
                user_email: row.get("user_email"),
                book_title: row.get("book_title"),
                book_author: row.get("book_author"),
                is_overdue: status == crate::models::BorrowStatus::Borrowed && due_date < today,
            });
        }

        Ok(result)
    }

    /// Aggregate counts for the admin dashboard
    pub async fn stats(&self) -> AppResult<BorrowRecordStats> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrow_records")
            .fetch_one(&self.pool)
            .await?;

        let borrowed: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM borrow_records WHERE status = 'BORROWED'")
                .fetch_one(&self.pool)
                .await?;

        let overdue: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrow_records \
             WHERE status = 'BORROWED' AND due_date < CURRENT_DATE",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(BorrowRecordStats {
            total,
            borrowed,
            overdue,
            returned: total - borrowed,
        })
    }
}
