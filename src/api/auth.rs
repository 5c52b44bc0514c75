//! Authentication endpoints

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::user::{AccountStatus, Role, SignUpRequest, User},
};

use super::{client_ip, AuthenticatedUser, SuccessResponse};

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of an account
#[derive(Serialize, ToSchema)]
pub struct UserInfo {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            status: user.status,
        }
    }
}

/// Login response with bearer token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub user: UserInfo,
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created, pending approval", body = SuccessResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn signup(
    State(state): State<crate::AppState>,
    headers: HeaderMap,
    Json(request): Json<SignUpRequest>,
) -> AppResult<(StatusCode, Json<SuccessResponse>)> {
    let client = client_ip(&headers);
    if !state.services.redis.check_rate_limit("signup", &client).await? {
        return Err(AppError::RateLimited(
            "Too many requests, please try again later".to_string(),
        ));
    }

    let user = state.services.auth.signup(request).await?;

    // Delivery is best-effort; the account exists either way
    if let Err(e) = state
        .services
        .email
        .send_welcome(&user.email, &user.full_name)
        .await
    {
        tracing::warn!("Failed to send welcome email to {}: {}", user.email, e);
    }

    Ok((StatusCode::CREATED, Json(SuccessResponse::ok())))
}

/// Authenticate with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, user) = state
        .services
        .auth
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        user: user.into(),
    }))
}

/// Current authenticated user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<UserInfo>> {
    let user = state.services.auth.get_by_id(claims.user_id).await?;
    Ok(Json(user.into()))
}
