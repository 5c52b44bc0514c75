//! User model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// User role. Assigned at creation and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

// SQLx conversion for Role (stored as TEXT)
impl sqlx::Type<Postgres> for Role {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for Role {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Role {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Account lifecycle status. Signup creates `Pending`; only admin actions
/// move an account out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    Pending,
    Approved,
    Rejected,
    Banned,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Pending => "PENDING",
            AccountStatus::Approved => "APPROVED",
            AccountStatus::Rejected => "REJECTED",
            AccountStatus::Banned => "BANNED",
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(AccountStatus::Pending),
            "APPROVED" => Ok(AccountStatus::Approved),
            "REJECTED" => Ok(AccountStatus::Rejected),
            "BANNED" => Ok(AccountStatus::Banned),
            _ => Err(format!("Invalid account status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for AccountStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for AccountStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for AccountStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Full user model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
    pub university_id: i32,
    /// Reference to the uploaded university card image
    pub university_card: String,
    pub role: Role,
    pub status: AccountStatus,
    pub last_activity_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Admin listing row (no password hash, no card)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub university_id: i32,
    pub role: Role,
    pub status: AccountStatus,
    pub last_activity_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Pending signup awaiting admin review
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AccountRequest {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub university_id: i32,
    pub university_card: String,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

/// Signup request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(length(min = 3, message = "Full name must be at least 3 characters"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(range(min = 0, message = "Invalid universityId value"))]
    pub university_id: i32,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Uploaded card reference; may be empty when the upload is pending
    #[serde(default)]
    pub university_card: String,
}

/// Admin request to change an account's status
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserStatus {
    pub status: AccountStatus,
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: Uuid,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Check if user is admin
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization("Admin privileges required".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("banned".parse::<AccountStatus>(), Ok(AccountStatus::Banned));
        assert_eq!("APPROVED".parse::<AccountStatus>(), Ok(AccountStatus::Approved));
        assert!("gone".parse::<AccountStatus>().is_err());
    }

    #[test]
    fn test_require_admin() {
        let claims = UserClaims {
            sub: "reader@university.edu".to_string(),
            user_id: Uuid::nil(),
            role: Role::User,
            exp: 0,
            iat: 0,
        };
        assert!(claims.require_admin().is_err());
        let admin = UserClaims { role: Role::Admin, ..claims };
        assert!(admin.require_admin().is_ok());
    }
}
