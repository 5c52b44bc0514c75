//! Borrow record model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

use super::book::BookSummary;

/// Borrow record lifecycle.
/// Single legal transition: `Borrowed -> Returned`; `Returned` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum BorrowStatus {
    Borrowed,
    Returned,
}

impl BorrowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowStatus::Borrowed => "BORROWED",
            BorrowStatus::Returned => "RETURNED",
        }
    }
}

impl std::fmt::Display for BorrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BorrowStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BORROWED" => Ok(BorrowStatus::Borrowed),
            "RETURNED" => Ok(BorrowStatus::Returned),
            _ => Err(format!("Invalid borrow status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for BorrowStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for BorrowStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BorrowStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Borrow record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub borrow_date: DateTime<Utc>,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub status: BorrowStatus,
}

/// Borrow record with its book, for profile display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BorrowDetails {
    pub id: Uuid,
    pub borrow_date: DateTime<Utc>,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub status: BorrowStatus,
    pub book: BookSummary,
}

/// Admin view of a borrow record with user and book context
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BorrowRecordDetails {
    pub id: Uuid,
    pub borrow_date: DateTime<Utc>,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub status: BorrowStatus,
    pub user_name: String,
    pub user_email: String,
    pub book_title: String,
    pub book_author: String,
    pub is_overdue: bool,
}

/// Borrow request
#[derive(Debug, Deserialize, ToSchema)]
pub struct BorrowRequest {
    pub user_id: Uuid,
    pub book_id: Uuid,
}

/// A user's borrowing quota snapshot
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BorrowQuota {
    pub max_books: i64,
    pub currently_borrowed: i64,
    pub remaining: i64,
    pub can_borrow: bool,
}

impl BorrowQuota {
    pub fn new(max_books: i64, currently_borrowed: i64) -> Self {
        Self {
            max_books,
            currently_borrowed,
            remaining: max_books - currently_borrowed,
            can_borrow: currently_borrowed < max_books,
        }
    }
}

/// Aggregate counts over all borrow records (admin dashboard)
#[derive(Debug, Serialize, ToSchema)]
pub struct BorrowRecordStats {
    pub total: i64,
    pub borrowed: i64,
    pub overdue: i64,
    pub returned: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_at_limit() {
        let quota = BorrowQuota::new(5, 5);
        assert_eq!(quota.remaining, 0);
        assert!(!quota.can_borrow);
    }

    #[test]
    fn test_quota_below_limit() {
        let quota = BorrowQuota::new(5, 3);
        assert_eq!(quota.remaining, 2);
        assert!(quota.can_borrow);
    }

    #[test]
    fn test_quota_lowered_below_current() {
        // Admin dropped max_books_allowed under a user's live count
        let quota = BorrowQuota::new(3, 4);
        assert_eq!(quota.remaining, -1);
        assert!(!quota.can_borrow);
    }
}
