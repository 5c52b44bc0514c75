//! System configuration repository

use crate::{
    error::{AppError, AppResult},
    models::settings::SystemConfig,
};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: sqlx::Pool<sqlx::Postgres>,
}

impl SettingsRepository {
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self { pool }
    }

    /// Get a configuration entry by key
    pub async fn get(&self, key: &str) -> AppResult<Option<SystemConfig>> {
        let config =
            sqlx::query_as::<_, SystemConfig>("SELECT * FROM system_config WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(config)
    }

    /// All configuration entries
    pub async fn list(&self) -> AppResult<Vec<SystemConfig>> {
        let configs = sqlx::query_as::<_, SystemConfig>("SELECT * FROM system_config ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(configs)
    }

    /// Update an entry, inserting it when absent
    pub async fn upsert(&self, key: &str, value: &str) -> AppResult<SystemConfig> {
        // Try to update existing record first
        let updated = sqlx::query_as::<_, SystemConfig>(
            "UPDATE system_config SET value = $2, updated_at = NOW() WHERE key = $1 RETURNING *",
        )
        .bind(key)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(config) = updated {
            return Ok(config);
        }

        // If no row was updated, insert a new one
        let created = sqlx::query_as::<_, SystemConfig>(
            "INSERT INTO system_config (key, value) VALUES ($1, $2) RETURNING *",
        )
        .bind(key)
        .bind(value)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(created)
    }
}
