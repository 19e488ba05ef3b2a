use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Json},
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{ApiError, Result};
use crate::models::subscriber::SubscribeRequest;
use crate::services::newsletter_service::NewsletterError;
use crate::AppState;

/// Public signup. Rate-limited at the route layer; the optional automation
/// webhook fires after the response is already decided.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> Result<Json<Value>> {
    let subscription = state.newsletter_service.subscribe(request).await?;
    let subscriber_id = subscription.id;

    let service = Arc::clone(&state.newsletter_service);
    tokio::spawn(async move {
        service.notify_signup(&subscription).await;
    });

    Ok(Json(json!({
        "message": "Welcome to the RetireWise+ Club!",
        "subscriber_id": subscriber_id,
    })))
}

pub async fn list_subscribers(State(state): State<AppState>) -> Result<Json<Value>> {
    let subscribers = state.newsletter_service.list_active().await?;
    Ok(Json(json!(subscribers)))
}

#[derive(Deserialize)]
pub struct AdminUnsubscribeBody {
    #[serde(default)]
    pub email: String,
}

pub async fn admin_unsubscribe(
    State(state): State<AppState>,
    Json(body): Json<AdminUnsubscribeBody>,
) -> Result<Json<Value>> {
    if body.email.trim().is_empty() {
        return Err(ApiError::BadRequest("Email required.".to_string()));
    }

    state
        .newsletter_service
        .unsubscribe_by_admin(&body.email)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("{} unsubscribed.", body.email),
    })))
}

#[derive(Deserialize)]
pub struct EmailLogBody {
    pub subscriber_id: i64,
    pub subject: String,
    pub status: String,
}

pub async fn log_email(
    State(state): State<AppState>,
    Json(body): Json<EmailLogBody>,
) -> Result<Json<Value>> {
    state
        .newsletter_service
        .log_email(body.subscriber_id, &body.subject, &body.status)
        .await?;

    Ok(Json(json!({ "success": true })))
}

#[derive(Template)]
#[template(path = "unsubscribe.html")]
struct UnsubscribeTemplate {
    message: String,
    success: bool,
}

fn unsubscribe_response(status: StatusCode, message: &str, success: bool) -> (StatusCode, Html<String>) {
    let template = UnsubscribeTemplate {
        message: message.to_string(),
        success,
    };
    let html = template
        .render()
        .unwrap_or_else(|_| "Template error".to_string());
    (status, Html(html))
}

#[derive(Deserialize)]
pub struct UnsubscribeQuery {
    pub email: Option<String>,
    pub token: Option<String>,
}

/// Landing page for the link embedded in every broadcast email. Token-gated
/// and independent of any session: the (email, token) pair is the
/// authorization.
pub async fn unsubscribe_page(
    State(state): State<AppState>,
    Query(query): Query<UnsubscribeQuery>,
) -> (StatusCode, Html<String>) {
    let (Some(email), Some(token)) = (query.email, query.token) else {
        return unsubscribe_response(StatusCode::BAD_REQUEST, "Invalid link.", false);
    };

    match state
        .newsletter_service
        .unsubscribe_with_token(&email, &token)
        .await
    {
        Ok(()) => unsubscribe_response(
            StatusCode::OK,
            "You've been unsubscribed. We're sorry to see you go.",
            true,
        ),
        Err(NewsletterError::InvalidLink) => unsubscribe_response(
            StatusCode::FORBIDDEN,
            "This unsubscribe link is invalid or has expired.",
            false,
        ),
        Err(NewsletterError::NotFound) => unsubscribe_response(
            StatusCode::NOT_FOUND,
            "Email not found in our list.",
            false,
        ),
        Err(e) => {
            tracing::error!("unsubscribe failed: {e}");
            unsubscribe_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error. Please try again later.",
                false,
            )
        }
    }
}
