//! Authentication service: signup, credential login, account gating

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{AccountStatus, SignUpRequest, User, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new account. The account starts PENDING and must be
    /// approved by an admin before it can borrow.
    pub async fn signup(&self, request: SignUpRequest) -> AppResult<User> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.users.email_exists(&request.email).await? {
            return Err(AppError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let password_hash = self.hash_password(&request.password)?;

        let user = self
            .repository
            .users
            .create(
                &request.full_name,
                &request.email,
                &password_hash,
                request.university_id,
                &request.university_card,
            )
            .await?;

        tracing::info!("signup success for {}", user.email);

        Ok(user)
    }

    /// Authenticate by email and password, returning a bearer token.
    /// Wrong email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        self.repository.users.touch_activity(user.id).await?;

        let token = self.token_for(&user)?;

        Ok((token, user))
    }

    /// Resolve the acting user and reject accounts that may not act.
    /// Each status gets its own rejection so the client can explain itself.
    pub async fn resolve_active_user(&self, user_id: Uuid) -> AppResult<User> {
        let user = self
            .repository
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Authentication("Authentication required".to_string()))?;

        match user.status {
            AccountStatus::Banned => Err(AppError::Authorization(
                "Your account has been banned".to_string(),
            )),
            AccountStatus::Pending => Err(AppError::Authorization(
                "Your account is pending approval, Please wait for a day or contact admin if urge"
                    .to_string(),
            )),
            AccountStatus::Rejected => Err(AppError::Authorization(
                "Your account has been rejected".to_string(),
            )),
            AccountStatus::Approved => Ok(user),
        }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Create a JWT token for a user
    pub fn token_for(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify user password against the stored argon2 hash
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
