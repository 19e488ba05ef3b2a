use crate::models::subscriber::Subscriber;
use crate::repositories::{map_unique_violation, RepositoryResult};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait SubscriberRepository: Send + Sync {
    async fn insert(
        &self,
        full_name: &str,
        email: &str,
        frequency: &str,
        topics: &str,
    ) -> RepositoryResult<i64>;
    async fn list_active(&self) -> RepositoryResult<Vec<Subscriber>>;
    /// Flips the row to `unsubscribed`. Returns the number of matched rows so
    /// callers can distinguish an unknown email (0) from a state transition.
    /// SQLite counts a matched row as affected even when the status was
    /// already `unsubscribed`, so repeating the call is idempotent.
    async fn mark_unsubscribed(&self, email: &str) -> RepositoryResult<u64>;
    async fn log_email(
        &self,
        subscriber_id: i64,
        subject: &str,
        status: &str,
    ) -> RepositoryResult<i64>;
}

pub struct SqliteSubscriberRepository {
    pool: SqlitePool,
}

impl SqliteSubscriberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriberRepository for SqliteSubscriberRepository {
    async fn insert(
        &self,
        full_name: &str,
        email: &str,
        frequency: &str,
        topics: &str,
    ) -> RepositoryResult<i64> {
        let result = sqlx::query(
            "INSERT INTO newsletter_subscribers \
               (full_name, email, frequency, topics, status, subscribed_at, updated_at) \
             VALUES (?, ?, ?, ?, 'active', datetime('now'), datetime('now'))",
        )
        .bind(full_name)
        .bind(email)
        .bind(frequency)
        .bind(topics)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(result.last_insert_rowid())
    }

    async fn list_active(&self) -> RepositoryResult<Vec<Subscriber>> {
        let subscribers = sqlx::query_as::<_, Subscriber>(
            "SELECT id, full_name, email, frequency, topics, status, subscribed_at, updated_at \
             FROM newsletter_subscribers WHERE status = 'active' ORDER BY subscribed_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(subscribers)
    }

    async fn mark_unsubscribed(&self, email: &str) -> RepositoryResult<u64> {
        let result = sqlx::query(
            "UPDATE newsletter_subscribers \
             SET status = 'unsubscribed', updated_at = datetime('now') WHERE email = ?",
        )
        .bind(email)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn log_email(
        &self,
        subscriber_id: i64,
        subject: &str,
        status: &str,
    ) -> RepositoryResult<i64> {
        let result = sqlx::query(
            "INSERT INTO newsletter_email_logs (subscriber_id, subject, status, sent_at) \
             VALUES (?, ?, ?, datetime('now'))",
        )
        .bind(subscriber_id)
        .bind(subject)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
