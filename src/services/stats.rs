//! Dashboard statistics service

use sqlx::Row;

use crate::{
    api::stats::{ActivityEntry, DashboardStats, TrendEntry},
    error::AppResult,
    models::borrow::BorrowRecordStats,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Headline numbers for the admin dashboard
    pub async fn get_dashboard(&self) -> AppResult<DashboardStats> {
        let pool = &self.repository.pool;

        let total_books: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(pool)
            .await?;

        let available_books: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(available_copies), 0) FROM books")
                .fetch_one(pool)
                .await?;

        let borrowed_books: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM borrow_records WHERE status = 'BORROWED'")
                .fetch_one(pool)
                .await?;

        let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        let pending_requests: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE status = 'PENDING'")
                .fetch_one(pool)
                .await?;

        let active_users: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE status = 'APPROVED'")
                .fetch_one(pool)
                .await?;

        Ok(DashboardStats {
            total_books,
            available_books,
            borrowed_books,
            total_users,
            pending_requests,
            active_users,
        })
    }

    /// Latest borrow records with user and book names
    pub async fn recent_activity(&self, limit: i64) -> AppResult<Vec<ActivityEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, u.full_name as user_name, b.title as book_title,
                   r.status, r.borrow_date, r.due_date, r.return_date
            FROM borrow_records r
            JOIN users u ON r.user_id = u.id
            JOIN books b ON r.book_id = b.id
            ORDER BY r.borrow_date DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.repository.pool)
        .await?;

        let activities = rows
            .into_iter()
            .map(|row| ActivityEntry {
                id: row.get("id"),
                user_name: row.get("user_name"),
                book_title: row.get("book_title"),
                status: row.get("status"),
                borrow_date: row.get("borrow_date"),
                due_date: row.get("due_date"),
                return_date: row.get("return_date"),
            })
            .collect();

        Ok(activities)
    }

    /// Borrows per day over the trailing window
    pub async fn borrowing_trends(&self, days: i32) -> AppResult<Vec<TrendEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT DATE(borrow_date) as date, COUNT(*) as borrowed
            FROM borrow_records
            WHERE borrow_date >= NOW() - make_interval(days => $1)
            GROUP BY DATE(borrow_date)
            ORDER BY DATE(borrow_date)
            "#,
        )
        .bind(days)
        .fetch_all(&self.repository.pool)
        .await?;

        let trends = rows
            .into_iter()
            .map(|row| TrendEntry {
                date: row.get("date"),
                borrowed: row.get("borrowed"),
            })
            .collect();

        Ok(trends)
    }

    /// Aggregate borrow record counts
    pub async fn borrow_record_stats(&self) -> AppResult<BorrowRecordStats> {
        self.repository.borrows.stats().await
    }
}
