//! System configuration endpoints (admin)

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::settings::{SystemConfig, UpdateConfigRequest},
};

use super::AuthenticatedUser;

/// List system configuration entries
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Configuration entries", body = Vec<SystemConfig>),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn get_settings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<SystemConfig>>> {
    claims.require_admin()?;

    let configs = state.services.settings.list().await?;
    Ok(Json(configs))
}

/// Upsert a configuration entry. Quota changes are visible to the very next
/// quota check.
#[utoipa::path(
    put,
    path = "/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    request_body = UpdateConfigRequest,
    responses(
        (status = 200, description = "Configuration updated", body = SystemConfig),
        (status = 400, description = "Invalid value"),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn update_settings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UpdateConfigRequest>,
) -> AppResult<Json<SystemConfig>> {
    claims.require_admin()?;

    let config = state
        .services
        .settings
        .update(&request.key, &request.value)
        .await?;
    Ok(Json(config))
}
