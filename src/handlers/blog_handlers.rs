use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Json},
};
use chrono::NaiveDateTime;
use serde_json::{json, Value};

use crate::error::Result;
use crate::models::blog::{Blog, PublishBlogRequest};
use crate::AppState;

const FALLBACK_HERO_IMAGE: &str =
    "https://images.unsplash.com/photo-1611974789855-9c2a0a7236a3?w=1200";

/// Admin publish. The response carries the new id immediately; the newsletter
/// broadcast is detached onto the runtime and its outcome is never observed
/// here.
pub async fn publish_blog(
    State(state): State<AppState>,
    Json(request): Json<PublishBlogRequest>,
) -> Result<Json<Value>> {
    let published = state.blog_service.publish(request, "Admin").await?;
    let blog_id = published.id;

    state.broadcast.spawn(published);

    Ok(Json(json!({ "message": "Post successful", "blog_id": blog_id })))
}

pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<Blog>>> {
    let blogs = state.blog_service.list().await?;
    Ok(Json(blogs))
}

pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    state.blog_service.delete(id).await?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Template)]
#[template(path = "blog.html")]
struct BlogTemplate {
    blog: Blog,
    excerpt: String,
    category: String,
    image: String,
    canonical_url: String,
    app_url: String,
    published_iso: String,
    published_display: String,
}

#[derive(Template)]
#[template(path = "blog_not_found.html")]
struct BlogNotFoundTemplate {}

/// Public detail view with SEO metadata and a structured-data block. Unknown
/// ids get the branded not-found variant.
pub async fn blog_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> (StatusCode, Html<String>) {
    let blog = match state.blog_service.get(id).await {
        Ok(Some(blog)) => blog,
        Ok(None) => return blog_not_found(),
        Err(e) => {
            tracing::error!("failed to load blog {id}: {e}");
            return blog_not_found();
        }
    };

    let (published_iso, published_display) = format_published(&blog.created_at);

    let template = BlogTemplate {
        excerpt: blog.excerpt(),
        category: blog
            .category
            .clone()
            .unwrap_or_else(|| "Market Insight".to_string()),
        image: blog
            .image_url
            .clone()
            .unwrap_or_else(|| FALLBACK_HERO_IMAGE.to_string()),
        canonical_url: format!("{}/blog/{}", state.config.app_url, blog.id),
        app_url: state.config.app_url.clone(),
        published_iso,
        published_display,
        blog,
    };

    let html = template
        .render()
        .unwrap_or_else(|_| "Template error".to_string());
    (StatusCode::OK, Html(html))
}

fn blog_not_found() -> (StatusCode, Html<String>) {
    let html = BlogNotFoundTemplate {}
        .render()
        .unwrap_or_else(|_| "Template error".to_string());
    (StatusCode::NOT_FOUND, Html(html))
}

/// SQLite stores `datetime('now')` as "YYYY-MM-DD HH:MM:SS".
fn format_published(created_at: &str) -> (String, String) {
    match NaiveDateTime::parse_from_str(created_at, "%Y-%m-%d %H:%M:%S") {
        Ok(dt) => (
            dt.and_utc().to_rfc3339(),
            dt.format("%-d %B %Y").to_string(),
        ),
        Err(_) => (created_at.to_string(), created_at.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_formats_sqlite_timestamps() {
        let (iso, display) = format_published("2026-03-05 09:30:00");
        assert_eq!(iso, "2026-03-05T09:30:00+00:00");
        assert_eq!(display, "5 March 2026");
    }

    #[test]
    fn unparseable_timestamp_passes_through() {
        let (iso, display) = format_published("soon");
        assert_eq!(iso, "soon");
        assert_eq!(display, "soon");
    }
}
