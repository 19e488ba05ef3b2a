use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A published insight. `content` is stored post-sanitization and is safe to
/// render verbatim.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub image_url: Option<String>,
    pub reference_link: Option<String>,
    pub category: Option<String>,
    pub nj_link: Option<String>,
    pub created_at: String,
}

impl Blog {
    /// Plain-text excerpt for meta descriptions: markup stripped, capped at
    /// 160 characters.
    pub fn excerpt(&self) -> String {
        let mut text = String::with_capacity(self.content.len());
        let mut in_tag = false;
        for ch in self.content.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                c if !in_tag => text.push(c),
                _ => {}
            }
        }
        text.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .take(160)
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishBlogRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub image_url: Option<String>,
    pub reference_link: Option<String>,
    pub category: Option<String>,
    pub nj_link: Option<String>,
}
