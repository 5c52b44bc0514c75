//! Borrow workflow endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::borrow::{
        BorrowDetails, BorrowQuota, BorrowRecord, BorrowRecordDetails, BorrowRecordStats,
        BorrowRequest,
    },
};

use super::{AuthenticatedUser, SuccessResponse};

/// Borrow response carrying the created record
#[derive(Serialize, ToSchema)]
pub struct BorrowResponse {
    pub success: bool,
    pub data: BorrowRecord,
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/borrows",
    tag = "borrows",
    security(("bearer_auth" = [])),
    request_body = BorrowRequest,
    responses(
        (status = 201, description = "Borrow record created", body = BorrowResponse),
        (status = 403, description = "Acting identity mismatch or inactive account"),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Quota exhausted or book unavailable")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<BorrowRequest>,
) -> AppResult<(StatusCode, Json<BorrowResponse>)> {
    let record = state.services.borrows.borrow_book(&claims, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(BorrowResponse {
            success: true,
            data: record,
        }),
    ))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/borrows/{id}/return",
    tag = "borrows",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Borrow record ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = SuccessResponse),
        (status = 403, description = "Not the record's owner"),
        (status = 404, description = "Borrow record not found"),
        (status = 409, description = "Already returned")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(record_id): Path<Uuid>,
) -> AppResult<Json<SuccessResponse>> {
    state.services.borrows.return_book(&claims, record_id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// The acting user's borrow history
#[utoipa::path(
    get,
    path = "/me/borrows",
    tag = "borrows",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Borrow records with book context", body = Vec<BorrowDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_borrows(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowDetails>>> {
    let borrows = state.services.borrows.borrows_for_user(claims.user_id).await?;
    Ok(Json(borrows))
}

/// The acting user's borrowing quota
#[utoipa::path(
    get,
    path = "/me/quota",
    tag = "borrows",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Quota snapshot", body = BorrowQuota),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_quota(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<BorrowQuota>> {
    let quota = state.services.borrows.quota(claims.user_id).await?;
    Ok(Json(quota))
}

/// Every borrow record with user/book context (admin)
#[utoipa::path(
    get,
    path = "/borrow-records",
    tag = "borrows",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All borrow records", body = Vec<BorrowRecordDetails>),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn list_borrow_records(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowRecordDetails>>> {
    claims.require_admin()?;

    let records = state.services.borrows.all_records().await?;
    Ok(Json(records))
}

/// Borrow record aggregates (admin)
#[utoipa::path(
    get,
    path = "/borrow-records/stats",
    tag = "borrows",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Borrow record counts", body = BorrowRecordStats),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn borrow_record_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<BorrowRecordStats>> {
    claims.require_admin()?;

    let stats = state.services.stats.borrow_record_stats().await?;
    Ok(Json(stats))
}
