//! Dashboard statistics endpoints (admin)

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::AppResult;

use super::AuthenticatedUser;

/// Headline dashboard numbers
#[derive(Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_books: i64,
    pub available_books: i64,
    pub borrowed_books: i64,
    pub total_users: i64,
    pub pending_requests: i64,
    pub active_users: i64,
}

/// One row of the recent-activity feed
#[derive(Serialize, ToSchema)]
pub struct ActivityEntry {
    pub id: Uuid,
    pub user_name: String,
    pub book_title: String,
    pub status: String,
    pub borrow_date: DateTime<Utc>,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

/// Borrows bucketed per day
#[derive(Serialize, ToSchema)]
pub struct TrendEntry {
    pub date: NaiveDate,
    pub borrowed: i64,
}

#[derive(Deserialize, IntoParams)]
pub struct ActivityQuery {
    /// Number of entries to return (default 10)
    pub limit: Option<i64>,
}

#[derive(Deserialize, IntoParams)]
pub struct TrendQuery {
    /// Trailing window in days (default 30)
    pub days: Option<i32>,
}

/// Dashboard totals
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<DashboardStats>> {
    claims.require_admin()?;

    let stats = state.services.stats.get_dashboard().await?;
    Ok(Json(stats))
}

/// Recent borrow/return activity
#[utoipa::path(
    get,
    path = "/stats/activity",
    tag = "stats",
    security(("bearer_auth" = [])),
    params(ActivityQuery),
    responses(
        (status = 200, description = "Recent activity", body = Vec<ActivityEntry>),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn get_recent_activity(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<Vec<ActivityEntry>>> {
    claims.require_admin()?;

    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let activity = state.services.stats.recent_activity(limit).await?;
    Ok(Json(activity))
}

/// Daily borrowing trend
#[utoipa::path(
    get,
    path = "/stats/trends",
    tag = "stats",
    security(("bearer_auth" = [])),
    params(TrendQuery),
    responses(
        (status = 200, description = "Borrows per day", body = Vec<TrendEntry>),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn get_borrowing_trends(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<TrendQuery>,
) -> AppResult<Json<Vec<TrendEntry>>> {
    claims.require_admin()?;

    let days = query.days.unwrap_or(30).clamp(1, 365);
    let trends = state.services.stats.borrowing_trends(days).await?;
    Ok(Json(trends))
}
