//! Signed upload parameters for the ImageKit widget
//!
//! The client-side upload widget asks this server for short-lived
//! authentication parameters instead of ever seeing the private key. The
//! signature scheme is ImageKit's: HMAC-SHA1 over token + expire, hex-encoded.

use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha1::Sha1;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    config::ImageKitConfig,
    error::{AppError, AppResult},
};

/// Signed parameters valid for 30 minutes
const UPLOAD_TOKEN_TTL_SECS: i64 = 30 * 60;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadAuthParams {
    pub token: String,
    pub expire: i64,
    pub signature: String,
    pub public_key: String,
    pub url_endpoint: String,
}

#[derive(Clone)]
pub struct UploadsService {
    config: ImageKitConfig,
}

impl UploadsService {
    pub fn new(config: ImageKitConfig) -> Self {
        Self { config }
    }

    /// Mint one-time authentication parameters for a client-side upload
    pub fn authentication_parameters(&self) -> AppResult<UploadAuthParams> {
        if self.config.private_key.is_empty() {
            return Err(AppError::Internal(
                "ImageKit private key is not configured".to_string(),
            ));
        }

        let token = Uuid::new_v4().to_string();
        let expire = Utc::now().timestamp() + UPLOAD_TOKEN_TTL_SECS;
        let signature = hmac_sha1_hex(
            &self.config.private_key,
            &format!("{}{}", token, expire),
        )?;

        Ok(UploadAuthParams {
            token,
            expire,
            signature,
            public_key: self.config.public_key.clone(),
            url_endpoint: self.config.url_endpoint.clone(),
        })
    }
}

fn hmac_sha1_hex(key: &str, message: &str) -> AppResult<String> {
    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
        .map_err(|e| AppError::Internal(format!("Failed to create HMAC: {}", e)))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_sha1_rfc2202_vector() {
        // RFC 2202 test case 2
        let sig = hmac_sha1_hex("Jefe", "what do ya want for nothing?").unwrap();
        assert_eq!(sig, "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79");
    }

    #[test]
    fn test_signature_changes_with_token() {
        let a = hmac_sha1_hex("private", "token-a1700000000").unwrap();
        let b = hmac_sha1_hex("private", "token-b1700000000").unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), 40);
    }
}
