//! Bearer token verification
//!
//! Tokens are issued by the external identity provider and signed with a
//! shared HS256 secret. The `sub` claim carries the user id; it is turned into
//! an explicit [`Session`] that handlers pass to every service call.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use keja_core::domain::Session;
use keja_shared::config::AuthSettings;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(settings: &AuthSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        match &settings.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            key: DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<Session, ApiError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {}", e)))?;

        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| ApiError::Unauthorized("Token subject is not a user id".to_string()))?;
        Ok(Session::new(user_id))
    }
}

/// Extractor for the authenticated caller
pub struct AuthSession(pub Session);

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Expected a bearer token".to_string()))?;

        state.jwt.verify(token).map(AuthSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn settings(audience: Option<&str>) -> AuthSettings {
        AuthSettings {
            jwt_secret: "test-secret".to_string(),
            audience: audience.map(str::to_string),
        }
    }

    fn token(sub: &str, secret: &str, expires_in: Duration, aud: Option<&str>) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp: (Utc::now() + expires_in).timestamp(),
            aud: aud.map(str::to_string),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_valid_token_yields_session() {
        let user = Uuid::new_v4();
        let verifier = JwtVerifier::new(&settings(None));
        let session = verifier
            .verify(&token(&user.to_string(), "test-secret", Duration::hours(1), Some("authenticated")))
            .unwrap();
        assert_eq!(session.user_id, user);
    }

    #[test]
    fn test_rejections() {
        let user = Uuid::new_v4().to_string();
        let verifier = JwtVerifier::new(&settings(None));

        assert!(verifier.verify(&token(&user, "other-secret", Duration::hours(1), None)).is_err());
        assert!(verifier.verify(&token(&user, "test-secret", Duration::hours(-2), None)).is_err());
        assert!(verifier.verify(&token("not-a-uuid", "test-secret", Duration::hours(1), None)).is_err());
        assert!(verifier.verify("garbage").is_err());
    }

    #[test]
    fn test_audience_enforced_when_configured() {
        let user = Uuid::new_v4().to_string();
        let verifier = JwtVerifier::new(&settings(Some("authenticated")));

        assert!(verifier.verify(&token(&user, "test-secret", Duration::hours(1), Some("authenticated"))).is_ok());
        assert!(verifier.verify(&token(&user, "test-secret", Duration::hours(1), Some("anon"))).is_err());
    }
}
