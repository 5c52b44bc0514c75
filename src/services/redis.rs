//! Redis service for request rate limiting

use redis::{AsyncCommands, Client};

use crate::error::{AppError, AppResult};

/// Requests allowed per window on the auth endpoints
pub const AUTH_RATE_LIMIT: i64 = 5;

/// Window length in seconds for the fixed-window counter
pub const AUTH_RATE_WINDOW_SECS: i64 = 60;

#[derive(Clone)]
pub struct RedisService {
    client: Client,
}

impl RedisService {
    /// Create a new Redis service
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        // Test connection
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    /// Fixed-window rate limit: count requests under `scope:client` and
    /// allow while the window's counter stays at or below the limit.
    pub async fn check_rate_limit(&self, scope: &str, client_id: &str) -> AppResult<bool> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let key = format!("ratelimit:{}:{}", scope, client_id);

        let count: i64 = conn
            .incr(&key, 1)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to bump rate limit counter: {}", e)))?;

        if count == 1 {
            conn.expire::<_, ()>(&key, AUTH_RATE_WINDOW_SECS)
                .await
                .map_err(|e| {
                    AppError::Internal(format!("Failed to expire rate limit counter: {}", e))
                })?;
        }

        Ok(count <= AUTH_RATE_LIMIT)
    }
}
