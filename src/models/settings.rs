//! System configuration model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Key under which the borrowing quota is stored
pub const MAX_BOOKS_ALLOWED_KEY: &str = "max_books_allowed";

/// Default quota when `max_books_allowed` is absent or unparsable
pub const DEFAULT_MAX_BOOKS: i64 = 5;

/// System configuration entry (string-encoded values)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SystemConfig {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Upsert request for a configuration entry
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateConfigRequest {
    pub key: String,
    pub value: String,
}
