use crate::models::user::{Role, User};
use crate::repositories::{RepositoryError, UserRepository};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier,
};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("All fields required")]
    MissingFields,
    #[error("Email already exists")]
    EmailTaken,
    #[error("User not found")]
    UserNotFound,
    #[error("Password hashing failed: {0}")]
    HashingError(String),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub locality: Option<String>,
    pub password: String,
}

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Public signup. Accounts always start with the `user` role; admins are
    /// promoted from the management CLI.
    pub async fn signup(&self, request: SignupRequest) -> Result<User, UserServiceError> {
        if request.name.trim().is_empty()
            || request.email.trim().is_empty()
            || request.password.is_empty()
        {
            return Err(UserServiceError::MissingFields);
        }

        self.create_user(request, Role::User).await
    }

    pub async fn create_user(
        &self,
        request: SignupRequest,
        role: Role,
    ) -> Result<User, UserServiceError> {
        let password_hash = self.hash_password(&request.password)?;

        match self
            .repository
            .create_user(
                &request.name,
                &request.email,
                request.phone.as_deref(),
                request.locality.as_deref(),
                &password_hash,
                role.as_str(),
            )
            .await
        {
            Ok(user) => Ok(user),
            Err(RepositoryError::AlreadyExists) => Err(UserServiceError::EmailTaken),
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserServiceError> {
        Ok(self.repository.find_by_email(email).await?)
    }

    pub async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>, UserServiceError> {
        Ok(self.repository.list_users(limit, offset).await?)
    }

    pub async fn set_password(&self, email: &str, password: &str) -> Result<(), UserServiceError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserServiceError::UserNotFound)?;

        let password_hash = self.hash_password(password)?;
        match self.repository.update_password(user.id, &password_hash).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(UserServiceError::UserNotFound),
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }

    pub async fn set_role(&self, email: &str, role: Role) -> Result<(), UserServiceError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserServiceError::UserNotFound)?;

        match self.repository.set_role(user.id, role.as_str()).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(UserServiceError::UserNotFound),
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, UserServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserServiceError::HashingError(e.to_string()))
    }

    pub fn verify_password(&self, password: &str, password_hash: &str) -> bool {
        if let Ok(parsed_hash) = PasswordHash::new(password_hash) {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;
    use mockall::predicate::*;

    fn stored_user(role: &str) -> User {
        User {
            id: 1,
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: None,
            locality: None,
            password_hash: "hash".to_string(),
            role: role.to_string(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn signup_creates_plain_user() {
        let mut mock_repo = MockUserRepository::new();
        let user = stored_user("user");
        mock_repo
            .expect_create_user()
            .with(
                eq("Asha"),
                eq("asha@example.com"),
                always(),
                always(),
                always(),
                eq("user"),
            )
            .times(1)
            .returning(move |_, _, _, _, _, _| {
                let user = user.clone();
                Box::pin(async move { Ok(user) })
            });

        let service = UserService::new(Arc::new(mock_repo));
        let result = service
            .signup(SignupRequest {
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                phone: None,
                locality: None,
                password: "password123".to_string(),
            })
            .await;

        assert_eq!(result.expect("signup").email, "asha@example.com");
    }

    #[tokio::test]
    async fn signup_rejects_missing_fields() {
        let service = UserService::new(Arc::new(MockUserRepository::new()));
        let result = service
            .signup(SignupRequest {
                name: String::new(),
                email: "asha@example.com".to_string(),
                phone: None,
                locality: None,
                password: "password123".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserServiceError::MissingFields)));
    }

    #[tokio::test]
    async fn duplicate_email_maps_to_email_taken() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create_user()
            .times(1)
            .returning(|_, _, _, _, _, _| {
                Box::pin(async move { Err(RepositoryError::AlreadyExists) })
            });

        let service = UserService::new(Arc::new(mock_repo));
        let result = service
            .signup(SignupRequest {
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                phone: None,
                locality: None,
                password: "password123".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserServiceError::EmailTaken)));
    }

    #[test]
    fn password_hash_round_trip() {
        let service = UserService::new(Arc::new(MockUserRepository::new()));
        let hash = service.hash_password("s3cret-pass").expect("hash");
        assert!(service.verify_password("s3cret-pass", &hash));
        assert!(!service.verify_password("wrong-pass", &hash));
    }
}
