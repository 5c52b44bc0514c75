//! Upload authentication endpoints

use axum::{extract::State, Json};

use crate::{error::AppResult, services::uploads::UploadAuthParams};

/// Signed parameters for a client-side ImageKit upload.
/// Public: the signup form uploads the university card before any session
/// exists.
#[utoipa::path(
    get,
    path = "/uploads/imagekit",
    tag = "uploads",
    responses(
        (status = 200, description = "Signed upload parameters", body = UploadAuthParams),
        (status = 500, description = "Upload service not configured")
    )
)]
pub async fn imagekit_auth(
    State(state): State<crate::AppState>,
) -> AppResult<Json<UploadAuthParams>> {
    let params = state.services.uploads.authentication_parameters()?;
    Ok(Json(params))
}
