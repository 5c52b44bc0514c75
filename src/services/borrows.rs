//! Borrow/return workflow service
//!
//! Maintains the two invariants of the lending domain: a book's outstanding
//! BORROWED records never exceed its total copies, and no user holds more
//! records than the configured quota. The acting principal is always an
//! explicit parameter; nothing here consults ambient session state.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        borrow::{BorrowDetails, BorrowQuota, BorrowRecord, BorrowRecordDetails, BorrowRequest},
        settings::{DEFAULT_MAX_BOOKS, MAX_BOOKS_ALLOWED_KEY},
        user::UserClaims,
    },
    repository::Repository,
    services::auth::AuthService,
};

/// Loan period applied to every borrow
pub const LOAN_PERIOD_DAYS: i64 = 7;

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
    auth: AuthService,
}

impl BorrowsService {
    pub fn new(repository: Repository, auth: AuthService) -> Self {
        Self { repository, auth }
    }

    /// Borrow a book for the acting user
    pub async fn borrow_book(
        &self,
        claims: &UserClaims,
        request: BorrowRequest,
    ) -> AppResult<BorrowRecord> {
        if claims.user_id != request.user_id {
            return Err(AppError::Authorization("Unauthorized".to_string()));
        }

        let user = self.auth.resolve_active_user(request.user_id).await?;

        let quota = self.quota(user.id).await?;
        if !quota.can_borrow {
            return Err(AppError::BusinessRule(format!(
                "You have reached your borrowing limit of {} books. \
                 Please return a book before borrowing another.",
                quota.max_books
            )));
        }

        let book = self.repository.books.get_by_id(request.book_id).await?;
        if book.available_copies <= 0 {
            return Err(AppError::BusinessRule(
                "Book is not available for borrowing.".to_string(),
            ));
        }

        let due_date = Utc::now().date_naive() + Duration::days(LOAN_PERIOD_DAYS);

        // The repository re-checks availability inside the transaction, so a
        // concurrent borrow of the last copy fails there rather than
        // overbooking.
        let record = self
            .repository
            .borrows
            .create(user.id, book.id, due_date)
            .await?;

        tracing::info!(
            user_id = %user.id,
            book_id = %book.id,
            record_id = %record.id,
            "book borrowed"
        );

        Ok(record)
    }

    /// Return a borrowed book. Only the record's owner or an admin may
    /// return it; returning twice fails without touching availability.
    pub async fn return_book(&self, claims: &UserClaims, record_id: Uuid) -> AppResult<()> {
        let user = self.auth.resolve_active_user(claims.user_id).await?;

        let record = self.repository.borrows.get_by_id(record_id).await?;

        if record.user_id != user.id && !claims.is_admin() {
            return Err(AppError::Authorization("Unauthorized.".to_string()));
        }

        self.repository
            .borrows
            .mark_returned(record.id, record.book_id)
            .await?;

        tracing::info!(record_id = %record.id, book_id = %record.book_id, "book returned");

        Ok(())
    }

    /// Current borrowing quota snapshot for a user
    pub async fn quota(&self, user_id: Uuid) -> AppResult<BorrowQuota> {
        let max_books = self.max_books_allowed().await?;
        let currently_borrowed = self.repository.borrows.count_borrowed(user_id).await?;
        Ok(BorrowQuota::new(max_books, currently_borrowed))
    }

    /// A user's borrow history with book context
    pub async fn borrows_for_user(&self, user_id: Uuid) -> AppResult<Vec<BorrowDetails>> {
        self.repository.borrows.list_for_user(user_id).await
    }

    /// Every borrow record with user and book context (admin view)
    pub async fn all_records(&self) -> AppResult<Vec<BorrowRecordDetails>> {
        self.repository.borrows.list_all().await
    }

    /// Read `max_books_allowed` from system config, defaulting to 5 when the
    /// key is absent or does not parse.
    async fn max_books_allowed(&self) -> AppResult<i64> {
        let max = self
            .repository
            .settings
            .get(MAX_BOOKS_ALLOWED_KEY)
            .await?
            .and_then(|config| config.value.parse::<i64>().ok())
            .unwrap_or(DEFAULT_MAX_BOOKS);
        Ok(max)
    }
}
