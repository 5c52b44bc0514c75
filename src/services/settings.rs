//! Settings service

use crate::{
    error::{AppError, AppResult},
    models::settings::{SystemConfig, MAX_BOOKS_ALLOWED_KEY},
    repository::Repository,
};

#[derive(Clone)]
pub struct SettingsService {
    repository: Repository,
}

impl SettingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All configuration entries
    pub async fn list(&self) -> AppResult<Vec<SystemConfig>> {
        self.repository.settings.list().await
    }

    /// Upsert a configuration entry. `max_books_allowed` must be a positive
    /// integer since the quota check parses it.
    pub async fn update(&self, key: &str, value: &str) -> AppResult<SystemConfig> {
        if key == MAX_BOOKS_ALLOWED_KEY {
            let parsed = value.parse::<i64>().map_err(|_| {
                AppError::Validation("max_books_allowed must be an integer".to_string())
            })?;
            if parsed < 1 {
                return Err(AppError::Validation(
                    "max_books_allowed must be at least 1".to_string(),
                ));
            }
        }

        self.repository.settings.upsert(key, value).await
    }
}
