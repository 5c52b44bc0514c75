//! Admin user management service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::user::{AccountRequest, AccountStatus, User, UserSummary},
    repository::Repository,
    services::email::EmailService,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    email: EmailService,
}

impl UsersService {
    pub fn new(repository: Repository, email: EmailService) -> Self {
        Self { repository, email }
    }

    /// All accounts for the admin table
    pub async fn list_users(&self) -> AppResult<Vec<UserSummary>> {
        self.repository.users.list_all().await
    }

    /// Change an account's status. Approval and rejection notify the user
    /// by email; delivery failures are logged, never surfaced.
    pub async fn update_status(&self, user_id: Uuid, status: AccountStatus) -> AppResult<User> {
        let user = self.repository.users.update_status(user_id, status).await?;

        match status {
            AccountStatus::Approved => {
                if let Err(e) = self
                    .email
                    .send_account_approved(&user.email, &user.full_name)
                    .await
                {
                    tracing::warn!("Failed to send approval email to {}: {}", user.email, e);
                }
            }
            AccountStatus::Rejected => {
                if let Err(e) = self
                    .email
                    .send_account_rejected(&user.email, &user.full_name)
                    .await
                {
                    tracing::warn!("Failed to send rejection email to {}: {}", user.email, e);
                }
            }
            _ => {}
        }

        tracing::info!(user_id = %user.id, status = %status, "user status updated");

        Ok(user)
    }

    /// Accounts awaiting review
    pub async fn account_requests(&self) -> AppResult<Vec<AccountRequest>> {
        self.repository.users.list_pending().await
    }

    /// Approve a pending signup
    pub async fn approve_request(&self, user_id: Uuid) -> AppResult<User> {
        self.update_status(user_id, AccountStatus::Approved).await
    }

    /// Reject a pending signup
    pub async fn reject_request(&self, user_id: Uuid) -> AppResult<User> {
        self.update_status(user_id, AccountStatus::Rejected).await
    }
}
