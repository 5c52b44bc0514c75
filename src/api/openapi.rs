//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, borrows, health, settings, stats, uploads, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ReadNest API",
        version = "0.1.0",
        description = "University Library Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::signup,
        auth::login,
        auth::me,
        // Books
        books::list_books,
        books::list_genres,
        books::get_book,
        books::list_books_admin,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Borrows
        borrows::borrow_book,
        borrows::return_book,
        borrows::my_borrows,
        borrows::my_quota,
        borrows::list_borrow_records,
        borrows::borrow_record_stats,
        // Users
        users::list_users,
        users::update_user_status,
        users::list_account_requests,
        users::approve_account_request,
        users::reject_account_request,
        // Stats
        stats::get_stats,
        stats::get_recent_activity,
        stats::get_borrowing_trends,
        // Settings
        settings::get_settings,
        settings::update_settings,
        // Uploads
        uploads::imagekit_auth,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            crate::models::user::SignUpRequest,
            crate::models::user::UpdateUserStatus,
            crate::models::user::UserSummary,
            crate::models::user::AccountRequest,
            crate::models::user::Role,
            crate::models::user::AccountStatus,
            // Books
            crate::models::book::Book,
            crate::models::book::BookSummary,
            crate::models::book::BookQuery,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book::Pagination,
            books::BookListResponse,
            // Borrows
            crate::models::borrow::BorrowRecord,
            crate::models::borrow::BorrowDetails,
            crate::models::borrow::BorrowRecordDetails,
            crate::models::borrow::BorrowRecordStats,
            crate::models::borrow::BorrowRequest,
            crate::models::borrow::BorrowQuota,
            crate::models::borrow::BorrowStatus,
            borrows::BorrowResponse,
            // Stats
            stats::DashboardStats,
            stats::ActivityEntry,
            stats::TrendEntry,
            // Settings
            crate::models::settings::SystemConfig,
            crate::models::settings::UpdateConfigRequest,
            // Uploads
            crate::services::uploads::UploadAuthParams,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
            crate::api::SuccessResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "books", description = "Catalog management"),
        (name = "borrows", description = "Borrow workflow"),
        (name = "users", description = "User management"),
        (name = "stats", description = "Dashboard statistics"),
        (name = "settings", description = "System configuration"),
        (name = "uploads", description = "Upload authentication")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
