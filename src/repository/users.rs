//! Users repository for database operations

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::user::{AccountRequest, AccountStatus, User, UserSummary},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: sqlx::Pool<sqlx::Postgres>,
}

impl UsersRepository {
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID, if present
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by email (primary authentication method)
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Insert a new account. Role is `USER` and status `PENDING` at creation.
    pub async fn create(
        &self,
        full_name: &str,
        email: &str,
        password_hash: &str,
        university_id: i32,
        university_card: &str,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (full_name, email, password, university_id, university_card)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(full_name)
        .bind(email)
        .bind(password_hash)
        .bind(university_id)
        .bind(university_card)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Set an account's status (admin action)
    pub async fn update_status(&self, id: Uuid, status: AccountStatus) -> AppResult<User> {
        sqlx::query_as::<_, User>("UPDATE users SET status = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Bump last_activity_date to today
    pub async fn touch_activity(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_activity_date = CURRENT_DATE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// All accounts, oldest first (admin listing)
    pub async fn list_all(&self) -> AppResult<Vec<UserSummary>> {
        let users = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT id, full_name, email, university_id, role, status,
                   last_activity_date, created_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Accounts awaiting approval, oldest first
    pub async fn list_pending(&self) -> AppResult<Vec<AccountRequest>> {
        let requests = sqlx::query_as::<_, AccountRequest>(
            r#"
            SELECT id, full_name, email, university_id, university_card, status, created_at
            FROM users
            WHERE status = 'PENDING'
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }
}
