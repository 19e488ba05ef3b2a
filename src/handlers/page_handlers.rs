use askama::Template;
use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::auth::token::ADMIN_COOKIE;
use crate::config::{
    calculator_by_slug, calculators, lesson_by_slug, lessons, tool_categories, Calculator, Lesson,
};
use crate::AppState;

fn render<T: Template>(template: T) -> Html<String> {
    Html(
        template
            .render()
            .unwrap_or_else(|_| "Template error".to_string()),
    )
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {}

#[derive(Template)]
#[template(path = "about.html")]
struct AboutTemplate {}

#[derive(Template)]
#[template(path = "terms.html")]
struct TermsTemplate {}

#[derive(Template)]
#[template(path = "privacy.html")]
struct PrivacyTemplate {}

#[derive(Template)]
#[template(path = "newsletter.html")]
struct NewsletterPageTemplate {}

#[derive(Template)]
#[template(path = "lead.html")]
struct LeadPageTemplate {}

#[derive(Template)]
#[template(path = "funds.html")]
struct FundsPageTemplate {}

#[derive(Template)]
#[template(path = "admin_login.html")]
struct AdminLoginTemplate {}

#[derive(Template)]
#[template(path = "admin_dashboard.html")]
struct AdminDashboardTemplate {}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {}

pub async fn home() -> Html<String> {
    render(IndexTemplate {})
}

pub async fn about() -> Html<String> {
    render(AboutTemplate {})
}

pub async fn terms() -> Html<String> {
    render(TermsTemplate {})
}

pub async fn privacy() -> Html<String> {
    render(PrivacyTemplate {})
}

pub async fn newsletter_page() -> Html<String> {
    render(NewsletterPageTemplate {})
}

pub async fn lead_page() -> Html<String> {
    render(LeadPageTemplate {})
}

pub async fn funds_page() -> Html<String> {
    render(FundsPageTemplate {})
}

struct CategoryGroup {
    name: &'static str,
    tools: Vec<&'static Calculator>,
}

#[derive(Template)]
#[template(path = "tools.html")]
struct ToolsTemplate {
    groups: Vec<CategoryGroup>,
    total_tools: usize,
    total_categories: usize,
}

pub async fn tools_page() -> Html<String> {
    let groups: Vec<CategoryGroup> = tool_categories()
        .iter()
        .map(|&name| CategoryGroup {
            name,
            tools: calculators().iter().filter(|c| c.category == name).collect(),
        })
        .filter(|group| !group.tools.is_empty())
        .collect();

    render(ToolsTemplate {
        total_tools: calculators().len(),
        total_categories: groups.len(),
        groups,
    })
}

#[derive(Template)]
#[template(path = "calculator.html")]
struct CalculatorTemplate {
    tool: &'static Calculator,
}

pub async fn calculator_page(Path(slug): Path<String>) -> Response {
    match calculator_by_slug(&slug) {
        Some(tool) => render(CalculatorTemplate { tool }).into_response(),
        None => (StatusCode::NOT_FOUND, render(NotFoundTemplate {})).into_response(),
    }
}

#[derive(Template)]
#[template(path = "learn_hub.html")]
struct LearnHubTemplate {
    lessons: &'static [Lesson],
}

pub async fn learn_hub() -> Html<String> {
    render(LearnHubTemplate { lessons: lessons() })
}

#[derive(Template)]
#[template(path = "learn_module.html")]
struct LearnModuleTemplate {
    lesson: &'static Lesson,
}

pub async fn learn_module(Path(slug): Path<String>) -> Response {
    match lesson_by_slug(&slug) {
        Some(lesson) => render(LearnModuleTemplate { lesson }).into_response(),
        None => (StatusCode::NOT_FOUND, render(NotFoundTemplate {})).into_response(),
    }
}

/// Login page. A still-valid admin cookie skips straight to the dashboard.
pub async fn admin_login_page(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(ADMIN_COOKIE) {
        if let Ok(claims) = state.jwt.verify(cookie.value()) {
            if claims.is_admin() {
                return Redirect::to("/admin-dashboard").into_response();
            }
        }
    }
    render(AdminLoginTemplate {}).into_response()
}

/// Behind `require_admin_page`. Marked uncacheable so a shared browser never
/// replays the dashboard after logout.
pub async fn admin_dashboard_page() -> Response {
    (
        [(
            header::CACHE_CONTROL,
            "no-store, no-cache, must-revalidate, private",
        )],
        render(AdminDashboardTemplate {}),
    )
        .into_response()
}

pub async fn health() -> Json<Value> {
    let env = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    Json(json!({ "status": "OK", "app": "RetireWise+", "env": env }))
}

pub async fn robots_txt() -> Response {
    let body = "User-agent: *\n\
                Disallow: /admin\n\
                Disallow: /admin-dashboard\n\
                Disallow: /admin-login\n\
                Disallow: /api/\n\
                Allow: /\n";
    ([(header::CONTENT_TYPE, "text/plain")], body).into_response()
}

/// Catch-all for unmatched routes.
pub async fn not_found(request: Request) -> Response {
    tracing::warn!("404 — {} {}", request.method(), request.uri());
    (StatusCode::NOT_FOUND, render(NotFoundTemplate {})).into_response()
}
