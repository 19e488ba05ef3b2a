use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::models::user::User;

/// Session cookie holding the admin token. Session-scoped: no max-age, so the
/// browser drops it on close.
pub const ADMIN_COOKIE: &str = "adminToken";

const ADMIN_TTL: Duration = Duration::from_secs(2 * 60 * 60);
const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub role: String,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error("missing token")]
    Missing,
    #[error("invalid or expired token")]
    Invalid,
}

#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    fn sign_with_ttl(&self, user: &User, ttl: Duration) -> Result<String, TokenError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as usize;
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
            iat: now,
            exp: now + ttl.as_secs() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        tracing::debug!(user_id = user.id, role = %user.role, "token signed");
        Ok(token)
    }

    /// Admin dashboard sessions expire after two hours.
    pub fn sign_admin(&self, user: &User) -> Result<String, TokenError> {
        self.sign_with_ttl(user, ADMIN_TTL)
    }

    /// General API logins get a day.
    pub fn sign_session(&self, user: &User) -> Result<String, TokenError> {
        self.sign_with_ttl(user, SESSION_TTL)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| TokenError::Invalid)?;
        Ok(data.claims)
    }
}

/// Pulls the token out of a request: `Authorization: Bearer` wins over the
/// admin cookie when both are present.
pub fn extract_token(headers: &HeaderMap, jar: &CookieJar) -> Option<String> {
    let bearer = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);

    bearer.or_else(|| jar.get(ADMIN_COOKIE).map(|c| c.value().to_string()))
}
