use axum::{extract::State, response::Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::token::ADMIN_COOKIE;
use crate::error::{ApiError, Result};
use crate::services::auth_service::LoginRequest;
use crate::services::user_service::SignupRequest;
use crate::AppState;

#[derive(Deserialize)]
pub struct SignupBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub locality: Option<String>,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupBody>,
) -> Result<Json<Value>> {
    state
        .user_service
        .signup(SignupRequest {
            name: body.name,
            email: body.email,
            phone: body.phone,
            locality: body.locality,
            password: body.password,
        })
        .await?;

    Ok(Json(json!({ "message": "User registered successfully!" })))
}

/// General login: any role, token returned in the body for API clients.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<Value>> {
    let (token, user) = state
        .auth_service
        .login(LoginRequest {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(Json(json!({
        "message": "Login successful",
        "token": token,
        "role": user.role,
        "user": { "name": user.name, "email": user.email, "role": user.role },
    })))
}

/// Dashboard login. On success the token is set as a session-scoped cookie:
/// HTTP-only, strict same-site, secure in production, no max-age so the
/// browser never writes it to disk.
pub async fn admin_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> Result<(CookieJar, Json<Value>)> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required.".to_string(),
        ));
    }

    let email = body.email.clone();
    let (token, _user) = state
        .auth_service
        .admin_login(LoginRequest {
            email: body.email,
            password: body.password,
        })
        .await?;

    let cookie = Cookie::build((ADMIN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(state.config.is_production())
        .build();

    tracing::info!(%email, "admin login");

    Ok((jar.add(cookie), Json(json!({ "success": true }))))
}

pub async fn admin_logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let jar = jar.remove(Cookie::build(ADMIN_COOKIE).path("/").build());
    (jar, Json(json!({ "success": true })))
}
