//! User management endpoints (admin)

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::user::{AccountRequest, UpdateUserStatus, UserSummary},
};

use super::{auth::UserInfo, AuthenticatedUser};

/// List all accounts
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All accounts", body = Vec<UserSummary>),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<UserSummary>>> {
    claims.require_admin()?;

    let users = state.services.users.list_users().await?;
    Ok(Json(users))
}

/// Change an account's status (approve / reject / ban / pend)
#[utoipa::path(
    put,
    path = "/users/{id}/status",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserStatus,
    responses(
        (status = 200, description = "Status updated", body = UserInfo),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserStatus>,
) -> AppResult<Json<UserInfo>> {
    claims.require_admin()?;

    let user = state.services.users.update_status(id, request.status).await?;
    Ok(Json(user.into()))
}

/// Pending account requests
#[utoipa::path(
    get,
    path = "/account-requests",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending signups", body = Vec<AccountRequest>),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn list_account_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<AccountRequest>>> {
    claims.require_admin()?;

    let requests = state.services.users.account_requests().await?;
    Ok(Json(requests))
}

/// Approve a pending account request
#[utoipa::path(
    post,
    path = "/account-requests/{id}/approve",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Account approved", body = UserInfo),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn approve_account_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserInfo>> {
    claims.require_admin()?;

    let user = state.services.users.approve_request(id).await?;
    Ok(Json(user.into()))
}

/// Reject a pending account request
#[utoipa::path(
    post,
    path = "/account-requests/{id}/reject",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Account rejected", body = UserInfo),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn reject_account_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserInfo>> {
    claims.require_admin()?;

    let user = state.services.users.reject_request(id).await?;
    Ok(Json(user.into()))
}
