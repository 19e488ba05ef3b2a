use crate::models::blog::{Blog, PublishBlogRequest};
use crate::repositories::{BlogRepository, RepositoryError};
use crate::services::sanitizer;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum BlogServiceError {
    #[error("Title and content are required.")]
    MissingFields,
    #[error("Content contains no valid text after sanitisation.")]
    EmptyContent,
    #[error("Blog not found.")]
    NotFound,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

/// The stored result of a publish, handed to the broadcast dispatcher.
#[derive(Debug, Clone)]
pub struct PublishedBlog {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub reference_link: Option<String>,
    pub category: Option<String>,
    pub nj_link: Option<String>,
}

pub struct BlogService {
    repository: Arc<dyn BlogRepository>,
}

impl BlogService {
    pub fn new(repository: Arc<dyn BlogRepository>) -> Self {
        Self { repository }
    }

    /// Sanitizes and stores a post. The returned record is complete enough
    /// for the caller to kick off the broadcast without re-reading the row;
    /// the publish response must never wait on that broadcast.
    pub async fn publish(
        &self,
        request: PublishBlogRequest,
        author: &str,
    ) -> Result<PublishedBlog, BlogServiceError> {
        if request.title.trim().is_empty() || request.content.trim().is_empty() {
            return Err(BlogServiceError::MissingFields);
        }

        let clean_content = sanitizer::sanitize_html(&request.content);
        if sanitizer::is_effectively_empty(&clean_content) {
            return Err(BlogServiceError::EmptyContent);
        }

        let id = self
            .repository
            .insert(
                &request.title,
                &clean_content,
                author,
                request.image_url.as_deref(),
                request.reference_link.as_deref(),
                request.category.as_deref(),
                request.nj_link.as_deref(),
            )
            .await?;

        tracing::info!(blog_id = id, title = %request.title, "blog published");

        Ok(PublishedBlog {
            id,
            title: request.title,
            content: clean_content,
            image_url: request.image_url,
            reference_link: request.reference_link,
            category: request.category,
            nj_link: request.nj_link,
        })
    }

    pub async fn list(&self) -> Result<Vec<Blog>, BlogServiceError> {
        Ok(self.repository.list().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Blog>, BlogServiceError> {
        Ok(self.repository.get(id).await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), BlogServiceError> {
        match self.repository.delete(id).await {
            Ok(()) => {
                tracing::info!(blog_id = id, "blog deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(BlogServiceError::NotFound),
            Err(e) => Err(BlogServiceError::RepositoryError(e)),
        }
    }
}
