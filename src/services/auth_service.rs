use crate::auth::token::JwtKeys;
use crate::models::user::User;
use crate::repositories::{RepositoryError, UserRepository};
use argon2::{password_hash::PasswordHash, Argon2, PasswordVerifier};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Unknown email and wrong password collapse into the same variant so the
    /// response never reveals which one failed.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Admin access only")]
    Forbidden,
    #[error("Token signing failed")]
    TokenSigning,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    jwt: JwtKeys,
}

impl AuthService {
    pub fn new(user_repository: Arc<dyn UserRepository>, jwt: JwtKeys) -> Self {
        Self {
            user_repository,
            jwt,
        }
    }

    async fn authenticate(&self, request: &LoginRequest) -> Result<User, AuthServiceError> {
        let user = self
            .user_repository
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !self.verify_password(&request.password, &user.password_hash) {
            return Err(AuthServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Dashboard login: credentials must check out AND the account must hold
    /// the admin role. Issues a short-lived token for the session cookie.
    pub async fn admin_login(
        &self,
        request: LoginRequest,
    ) -> Result<(String, User), AuthServiceError> {
        let user = self.authenticate(&request).await?;

        if !user.is_admin() {
            return Err(AuthServiceError::Forbidden);
        }

        let token = self
            .jwt
            .sign_admin(&user)
            .map_err(|_| AuthServiceError::TokenSigning)?;

        Ok((token, user))
    }

    /// General login used by the public site; any role, day-long token
    /// returned in the response body.
    pub async fn login(&self, request: LoginRequest) -> Result<(String, User), AuthServiceError> {
        let user = self.authenticate(&request).await?;

        let token = self
            .jwt
            .sign_session(&user)
            .map_err(|_| AuthServiceError::TokenSigning)?;

        Ok((token, user))
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> bool {
        if let Ok(parsed_hash) = PasswordHash::new(password_hash) {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        } else {
            false
        }
    }
}
