use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

// Type alias for Result with our ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

/// Request-level error taxonomy shared by every JSON route.
///
/// Database failures are logged with context where they occur and reach the
/// client only as a generic message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("A consultation request with this phone or email already exists.")]
    DuplicateLead,

    #[error("{0}")]
    DuplicateEmail(String),

    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthenticated,

    #[error("Admin access only.")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("Content contains no valid text after sanitisation.")]
    EmptyContent,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::BadRequest(_)
            | ApiError::DuplicateLead
            | ApiError::DuplicateEmail(_)
            | ApiError::EmptyContent => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // The lead funnel speaks {success, message}; everything else {error}.
        let body = match &self {
            ApiError::Validation(msg) => json!({ "success": false, "message": msg }),
            ApiError::DuplicateLead => json!({ "success": false, "message": self.to_string() }),
            ApiError::Database(e) => {
                tracing::error!("database error: {e}");
                json!({ "error": "Server error." })
            }
            ApiError::Internal => json!({ "error": "Server error." }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<crate::repositories::RepositoryError> for ApiError {
    fn from(err: crate::repositories::RepositoryError) -> Self {
        use crate::repositories::RepositoryError;
        match err {
            RepositoryError::NotFound => ApiError::NotFound("Not found.".to_string()),
            RepositoryError::AlreadyExists => ApiError::DuplicateEmail("Already exists.".to_string()),
            RepositoryError::Database(e) => ApiError::Database(e),
        }
    }
}

impl From<crate::services::lead_service::LeadServiceError> for ApiError {
    fn from(err: crate::services::lead_service::LeadServiceError) -> Self {
        use crate::services::lead_service::LeadServiceError;
        match err {
            LeadServiceError::Validation(msg) => ApiError::Validation(msg),
            LeadServiceError::Duplicate => ApiError::DuplicateLead,
            LeadServiceError::NotFound => ApiError::NotFound("Lead not found.".to_string()),
            LeadServiceError::RepositoryError(e) => e.into_internal(),
        }
    }
}

impl From<crate::services::newsletter_service::NewsletterError> for ApiError {
    fn from(err: crate::services::newsletter_service::NewsletterError) -> Self {
        use crate::services::newsletter_service::NewsletterError;
        match err {
            NewsletterError::MissingFields => {
                ApiError::BadRequest("Name and email are required.".to_string())
            }
            NewsletterError::DuplicateEmail => {
                ApiError::DuplicateEmail("You're already in the club!".to_string())
            }
            NewsletterError::NotFound => ApiError::NotFound("Email not found.".to_string()),
            NewsletterError::InvalidLink => {
                ApiError::BadRequest("This unsubscribe link is invalid or has expired.".to_string())
            }
            NewsletterError::RepositoryError(e) => e.into_internal(),
        }
    }
}

impl From<crate::services::blog_service::BlogServiceError> for ApiError {
    fn from(err: crate::services::blog_service::BlogServiceError) -> Self {
        use crate::services::blog_service::BlogServiceError;
        match err {
            BlogServiceError::MissingFields => {
                ApiError::BadRequest("Title and content are required.".to_string())
            }
            BlogServiceError::EmptyContent => ApiError::EmptyContent,
            BlogServiceError::NotFound => ApiError::NotFound("Blog not found.".to_string()),
            BlogServiceError::RepositoryError(e) => e.into_internal(),
        }
    }
}

impl From<crate::services::auth_service::AuthServiceError> for ApiError {
    fn from(err: crate::services::auth_service::AuthServiceError) -> Self {
        use crate::services::auth_service::AuthServiceError;
        match err {
            AuthServiceError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthServiceError::Forbidden => ApiError::Forbidden,
            AuthServiceError::TokenSigning => ApiError::Internal,
            AuthServiceError::RepositoryError(e) => e.into_internal(),
        }
    }
}

impl From<crate::services::user_service::UserServiceError> for ApiError {
    fn from(err: crate::services::user_service::UserServiceError) -> Self {
        use crate::services::user_service::UserServiceError;
        match err {
            UserServiceError::MissingFields => {
                ApiError::BadRequest("All fields required".to_string())
            }
            UserServiceError::EmailTaken => {
                ApiError::DuplicateEmail("Email already exists".to_string())
            }
            UserServiceError::UserNotFound => ApiError::NotFound("User not found".to_string()),
            UserServiceError::HashingError(_) => ApiError::Internal,
            UserServiceError::RepositoryError(e) => e.into_internal(),
        }
    }
}

impl crate::repositories::RepositoryError {
    fn into_internal(self) -> ApiError {
        match self {
            crate::repositories::RepositoryError::Database(e) => ApiError::Database(e),
            _ => ApiError::Internal,
        }
    }
}
