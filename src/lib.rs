pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod router;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use std::sync::Arc;

use crate::auth::token::JwtKeys;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub jwt: JwtKeys,
    pub user_service: Arc<services::user_service::UserService>,
    pub auth_service: Arc<services::auth_service::AuthService>,
    pub lead_service: Arc<services::lead_service::LeadService>,
    pub newsletter_service: Arc<services::newsletter_service::NewsletterService>,
    pub blog_service: Arc<services::blog_service::BlogService>,
    pub broadcast: Arc<services::broadcast::BroadcastDispatcher>,
    pub pool: sqlx::SqlitePool,
}
