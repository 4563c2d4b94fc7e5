//! Bearer-token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use supplyhub_core::config::AuthConfig;
use supplyhub_core::error::AppError;

use super::claims::Claims;

/// Validates HS256 access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Create a decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verify signature and expiry, returning the claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid token signature")
                }
                _ => AppError::unauthorized(format!("Invalid token: {e}")),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use supplyhub_core::types::UserId;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.into(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issued_token_decodes_to_same_user() {
        let cfg = config("test-secret");
        let user = UserId::new();
        let token = JwtEncoder::new(&cfg).issue(user).unwrap();
        let claims = JwtDecoder::new(&cfg).decode(&token.access_token).unwrap();
        assert_eq!(claims.user_id(), user);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtEncoder::new(&config("a")).issue(UserId::new()).unwrap();
        let err = JwtDecoder::new(&config("b"))
            .decode(&token.access_token)
            .unwrap_err();
        assert_eq!(err.code(), "UNAUTHORIZED");
    }

    #[test]
    fn test_expired_token_rejected() {
        let cfg = config("test-secret");
        let token = JwtEncoder::new(&cfg)
            .issue_with_ttl(UserId::new(), chrono::Duration::minutes(-10))
            .unwrap();
        let err = JwtDecoder::new(&cfg).decode(&token.access_token).unwrap_err();
        assert_eq!(err.message, "Token has expired");
    }

    #[test]
    fn test_garbage_rejected() {
        let err = JwtDecoder::new(&config("s")).decode("not.a.token").unwrap_err();
        assert_eq!(err.code(), "UNAUTHORIZED");
    }
}
