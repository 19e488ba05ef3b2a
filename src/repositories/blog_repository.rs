use crate::models::blog::Blog;
use crate::repositories::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait BlogRepository: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    async fn insert(
        &self,
        title: &str,
        content: &str,
        author: &str,
        image_url: Option<&str>,
        reference_link: Option<&str>,
        category: Option<&str>,
        nj_link: Option<&str>,
    ) -> RepositoryResult<i64>;
    async fn list(&self) -> RepositoryResult<Vec<Blog>>;
    async fn get(&self, id: i64) -> RepositoryResult<Option<Blog>>;
    async fn delete(&self, id: i64) -> RepositoryResult<()>;
}

pub struct SqliteBlogRepository {
    pool: SqlitePool,
}

impl SqliteBlogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const BLOG_COLUMNS: &str =
    "id, title, content, author, image_url, reference_link, category, nj_link, created_at";

#[async_trait]
impl BlogRepository for SqliteBlogRepository {
    async fn insert(
        &self,
        title: &str,
        content: &str,
        author: &str,
        image_url: Option<&str>,
        reference_link: Option<&str>,
        category: Option<&str>,
        nj_link: Option<&str>,
    ) -> RepositoryResult<i64> {
        let result = sqlx::query(
            "INSERT INTO blogs \
               (title, content, author, image_url, reference_link, category, nj_link, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, datetime('now'))",
        )
        .bind(title)
        .bind(content)
        .bind(author)
        .bind(image_url)
        .bind(reference_link)
        .bind(category)
        .bind(nj_link)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn list(&self) -> RepositoryResult<Vec<Blog>> {
        let blogs = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(blogs)
    }

    async fn get(&self, id: i64) -> RepositoryResult<Option<Blog>> {
        let blog = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(blog)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
