use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::auth::token::{extract_token, ADMIN_COOKIE};
use crate::error::ApiError;
use crate::AppState;

/// Guards the admin JSON API. The token may arrive as a bearer header or as
/// the admin cookie; verified claims are stored in request extensions for
/// handlers that need the caller's identity.
pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match extract_token(request.headers(), &jar) {
        Some(token) => token,
        None => return ApiError::Unauthenticated.into_response(),
    };

    let claims = match state.jwt.verify(&token) {
        Ok(claims) => claims,
        Err(_) => return ApiError::Unauthenticated.into_response(),
    };

    if !claims.is_admin() {
        return ApiError::Forbidden.into_response();
    }

    request.extensions_mut().insert(claims);
    next.run(request).await
}

/// Guards browser-visited admin pages. Reads the cookie only and redirects to
/// the login page, clearing a stale cookie on the way out.
pub async fn require_admin_page(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match jar.get(ADMIN_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => return Redirect::to("/admin-login").into_response(),
    };

    match state.jwt.verify(&token) {
        Ok(claims) if claims.is_admin() => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Ok(_) => Redirect::to("/admin-login").into_response(),
        Err(_) => {
            let jar = jar.remove(Cookie::from(ADMIN_COOKIE));
            (jar, Redirect::to("/admin-login")).into_response()
        }
    }
}
