use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::{self, Next},
    response::{Redirect, Response},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::json;
use std::time::Duration;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::auth;
use crate::handlers;
use crate::middleware::{rate_limit_middleware, RateLimiter};
use crate::AppState;

/// Full application router. `main` serves it; integration tests drive it
/// directly so they exercise the exact production wiring.
pub fn build_router(app_state: AppState) -> Router {
    // Fixed-window limiters, one per abuse-prone route
    let login_limiter = RateLimiter::new(
        "login",
        10,
        Duration::from_secs(15 * 60),
        json!({ "error": "Too many login attempts. Please wait 15 minutes and try again." }),
    );
    let lead_limiter = RateLimiter::new(
        "leads",
        5,
        Duration::from_secs(60 * 60),
        json!({ "success": false, "message": "Too many submissions. Please try again in an hour." }),
    );
    let newsletter_limiter = RateLimiter::new(
        "newsletter",
        3,
        Duration::from_secs(60 * 60),
        json!({ "error": "Too many signup attempts. Please try again later." }),
    );

    // Admin JSON API
    let admin_api = Router::new()
        .route("/api/leads", get(handlers::list_leads))
        .route("/api/leads/{id}", get(handlers::get_lead))
        .route("/api/leads/{id}", put(handlers::update_lead))
        .route("/api/leads-stats", get(handlers::lead_stats))
        .route("/api/leads-by-age", get(handlers::leads_by_age))
        .route("/api/leads-by-goal", get(handlers::leads_by_goal))
        .route("/api/newsletter/subscribers", get(handlers::list_subscribers))
        .route("/api/newsletter/unsubscribe", post(handlers::admin_unsubscribe))
        .route("/api/newsletter/email-log", post(handlers::log_email))
        .route("/api/blogs/post", post(handlers::publish_blog))
        .route("/api/blogs/{id}", delete(handlers::delete_blog))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth::middleware::require_admin,
        ));

    // Protected browser pages
    let admin_pages = Router::new()
        .route("/admin", get(handlers::admin_dashboard_page))
        .route("/admin-dashboard", get(handlers::admin_dashboard_page))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth::middleware::require_admin_page,
        ));

    // Login endpoints share one limiter window per client
    let login_routes = Router::new()
        .route("/api/auth/signup", post(handlers::signup))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/admin/login", post(handlers::admin_login))
        .layer(middleware::from_fn_with_state(
            login_limiter,
            rate_limit_middleware,
        ));

    let lead_submit = Router::new()
        .route("/api/leads", post(handlers::submit_lead))
        .layer(middleware::from_fn_with_state(
            lead_limiter,
            rate_limit_middleware,
        ));

    let newsletter_signup = Router::new()
        .route("/api/newsletter/subscribe", post(handlers::subscribe))
        .layer(middleware::from_fn_with_state(
            newsletter_limiter,
            rate_limit_middleware,
        ));

    Router::new()
        // Public API
        .merge(lead_submit)
        .merge(newsletter_signup)
        .merge(login_routes)
        .route("/api/admin/logout", post(handlers::admin_logout))
        .route("/api/blogs", get(handlers::list_blogs))
        .route("/api/funds", get(handlers::list_funds))
        .merge(admin_api)
        // Pages
        .route("/", get(handlers::home))
        .route("/index", get(|| async { Redirect::to("/") }))
        .route("/about", get(handlers::about))
        .route("/terms", get(handlers::terms))
        .route("/privacy", get(handlers::privacy))
        .route("/newsletter", get(handlers::newsletter_page))
        .route("/lead", get(handlers::lead_page))
        .route("/funds", get(handlers::funds_page))
        .route("/learn", get(handlers::learn_hub))
        .route("/learn/{slug}", get(handlers::learn_module))
        .route("/tools", get(handlers::tools_page))
        .route("/calculators", get(|| async { Redirect::to("/tools") }))
        .route("/calculator/{slug}", get(handlers::calculator_page))
        .route("/blog/{id}", get(handlers::blog_page))
        .route("/unsubscribe", get(handlers::unsubscribe_page))
        .route("/admin-login", get(handlers::admin_login_page))
        .merge(admin_pages)
        // Legacy .html paths kept as permanent redirects
        .merge(legacy_redirects())
        // Operational endpoints
        .route("/health", get(handlers::health))
        .route("/robots.txt", get(handlers::robots_txt))
        // Static files
        .nest_service("/static", ServeDir::new("static"))
        // Layers
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(add_security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

fn legacy_redirects() -> Router<AppState> {
    const REDIRECTS: &[(&str, &str)] = &[
        ("/sip.html", "/calculator/sip"),
        ("/lumpsum.html", "/calculator/lumpsum"),
        ("/retirement.html", "/calculator/retirement"),
        ("/goal.html", "/calculator/goal"),
        ("/swp.html", "/calculator/swp"),
        ("/cagr.html", "/calculator/cagr"),
        ("/fd.html", "/calculator/fd"),
        ("/stepupsip.html", "/calculator/step-up-sip"),
        ("/about.html", "/about"),
        ("/newsletter.html", "/newsletter"),
        ("/lead.html", "/lead"),
        ("/terms.html", "/terms"),
        ("/privacy.html", "/privacy"),
        ("/index.html", "/"),
    ];

    let mut router = Router::new();
    for (from, to) in REDIRECTS {
        router = router.route(from, get(move || async move { Redirect::permanent(to) }));
    }
    router
}

async fn add_security_headers(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    if std::env::var("ENVIRONMENT")
        .map(|env| env == "production")
        .unwrap_or(false)
    {
        headers.insert(
            "Strict-Transport-Security",
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    response
}
