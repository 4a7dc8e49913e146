//! Verification of the access tokens issued by the accounts service.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token format or signature")]
    InvalidToken,
}

/// Identity carried by a verified access token. `sub` is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub jti: String,
    pub iss: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TokenManager: Send + Sync {
    fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError>;
}

/// The `jwt` configuration section.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub access_secret: String,
    pub issuer: String,
    pub audience: String,
}

pub struct JwtService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(settings: JwtSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.set_issuer(&[&settings.issuer]);
        validation.set_audience(&[&settings.audience]);

        Self { decoding_key: DecodingKey::from_secret(settings.access_secret.as_bytes()), validation }
    }
}

impl TokenManager for JwtService {
    fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::*;

    const SECRET: &str = "test_access_secret_key_12345";

    fn settings() -> JwtSettings {
        JwtSettings {
            access_secret: SECRET.to_string(),
            issuer: "test_issuer".to_string(),
            audience: "test_audience".to_string(),
        }
    }

    fn sign(claims: &Claims, algorithm: Algorithm, secret: &str) -> String {
        encode(&Header::new(algorithm), claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn claims_expiring_in(secs: i64) -> Claims {
        let now = Utc::now();
        Claims {
            sub: 42,
            jti: "jti-1".to_string(),
            iss: "test_issuer".to_string(),
            aud: "test_audience".to_string(),
            exp: (now + Duration::seconds(secs)).timestamp() as usize,
            iat: now.timestamp() as usize,
        }
    }

    #[test]
    fn test_validate_access_token_success() {
        let service = JwtService::new(settings());
        let token = sign(&claims_expiring_in(3600), Algorithm::HS512, SECRET);

        let claims = service.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.iss, "test_issuer");
        assert_eq!(claims.aud, "test_audience");
    }

    #[test]
    fn test_validate_access_token_expired() {
        let service = JwtService::new(settings());
        let token = sign(&claims_expiring_in(-3600), Algorithm::HS512, SECRET);

        assert!(matches!(service.validate_access_token(&token), Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_validate_access_token_wrong_secret() {
        let service = JwtService::new(settings());
        let token = sign(&claims_expiring_in(3600), Algorithm::HS512, "another_secret");

        assert!(matches!(service.validate_access_token(&token), Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_validate_access_token_wrong_audience() {
        let service = JwtService::new(settings());
        let mut claims = claims_expiring_in(3600);
        claims.aud = "someone_else".to_string();
        let token = sign(&claims, Algorithm::HS512, SECRET);

        assert!(matches!(service.validate_access_token(&token), Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_validate_access_token_wrong_algorithm() {
        let service = JwtService::new(settings());
        let token = sign(&claims_expiring_in(3600), Algorithm::HS256, SECRET);

        assert!(matches!(service.validate_access_token(&token), Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_validate_access_token_garbage() {
        let service = JwtService::new(settings());

        assert!(matches!(service.validate_access_token("not.a.jwt"), Err(JwtError::InvalidToken)));
    }
}
