//! Business logic services

pub mod auth;
pub mod borrows;
pub mod catalog;
pub mod email;
pub mod redis;
pub mod settings;
pub mod stats;
pub mod uploads;
pub mod users;

use crate::{
    config::{AuthConfig, EmailConfig, ImageKitConfig},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub borrows: borrows::BorrowsService,
    pub users: users::UsersService,
    pub settings: settings::SettingsService,
    pub stats: stats::StatsService,
    pub email: email::EmailService,
    pub redis: redis::RedisService,
    pub uploads: uploads::UploadsService,
}

impl Services {
    /// Create all services with the given repository
    pub async fn new(
        repository: Repository,
        auth_config: AuthConfig,
        email_config: EmailConfig,
        imagekit_config: ImageKitConfig,
        redis_service: redis::RedisService,
    ) -> AppResult<Self> {
        let auth = auth::AuthService::new(repository.clone(), auth_config);
        let email = email::EmailService::new(email_config);

        Ok(Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            borrows: borrows::BorrowsService::new(repository.clone(), auth.clone()),
            users: users::UsersService::new(repository.clone(), email.clone()),
            settings: settings::SettingsService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
            uploads: uploads::UploadsService::new(imagekit_config),
            auth,
            email,
            redis: redis_service,
        })
    }
}
