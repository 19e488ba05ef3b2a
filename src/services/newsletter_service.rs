use crate::models::subscriber::{SubscribeRequest, Subscriber};
use crate::repositories::{RepositoryError, SubscriberRepository};
use crate::services::unsubscribe::UnsubscribeSigner;
use std::sync::Arc;
use std::time::Duration;

const SIGNUP_WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_FREQUENCY: &str = "weekly";

#[derive(Debug, thiserror::Error)]
pub enum NewsletterError {
    #[error("Name and email are required.")]
    MissingFields,
    #[error("You're already in the club!")]
    DuplicateEmail,
    #[error("Email not found.")]
    NotFound,
    /// The presented unsubscribe token does not match the email.
    #[error("This unsubscribe link is invalid or has expired.")]
    InvalidLink,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct NewSubscription {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub frequency: String,
    pub topics: String,
}

pub struct NewsletterService {
    repository: Arc<dyn SubscriberRepository>,
    signer: UnsubscribeSigner,
    signup_webhook_url: Option<String>,
    client: reqwest::Client,
}

impl NewsletterService {
    pub fn new(
        repository: Arc<dyn SubscriberRepository>,
        signer: UnsubscribeSigner,
        signup_webhook_url: Option<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(SIGNUP_WEBHOOK_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            repository,
            signer,
            signup_webhook_url,
            client,
        }
    }

    pub async fn subscribe(
        &self,
        request: SubscribeRequest,
    ) -> Result<NewSubscription, NewsletterError> {
        if request.full_name.trim().is_empty() || request.email.trim().is_empty() {
            return Err(NewsletterError::MissingFields);
        }

        let frequency = request
            .frequency
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FREQUENCY.to_string());
        let topics = request.topics.joined();

        let id = match self
            .repository
            .insert(&request.full_name, &request.email, &frequency, &topics)
            .await
        {
            Ok(id) => id,
            Err(RepositoryError::AlreadyExists) => return Err(NewsletterError::DuplicateEmail),
            Err(e) => return Err(NewsletterError::RepositoryError(e)),
        };

        tracing::info!(subscriber_id = id, email = %request.email, "new subscriber");

        Ok(NewSubscription {
            id,
            full_name: request.full_name,
            email: request.email,
            frequency,
            topics,
        })
    }

    /// Best-effort signup notification to the automation pipeline. Runs after
    /// the subscriber row is committed; the caller spawns it and never waits.
    pub async fn notify_signup(&self, subscription: &NewSubscription) {
        let Some(url) = &self.signup_webhook_url else {
            tracing::warn!("signup webhook not configured; skipping notification");
            return;
        };

        let payload = serde_json::json!({
            "name": subscription.full_name,
            "email": subscription.email,
            "frequency": subscription.frequency,
            "topics": subscription.topics,
            "subscriber_id": subscription.id,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        match self.client.post(url).json(&payload).send().await {
            Ok(_) => tracing::info!(email = %subscription.email, "signup webhook fired"),
            Err(e) => {
                tracing::warn!("signup webhook failed (subscriber still saved): {e}")
            }
        }
    }

    /// Token-gated unsubscribe from an email link. Verification is stateless:
    /// anyone holding a valid (email, token) pair may unsubscribe.
    ///
    /// Re-running the link for an already-unsubscribed address succeeds
    /// idempotently; the row still matches the UPDATE.
    pub async fn unsubscribe_with_token(
        &self,
        email: &str,
        token: &str,
    ) -> Result<(), NewsletterError> {
        if !self.signer.verify(email, token) {
            return Err(NewsletterError::InvalidLink);
        }

        self.apply_unsubscribe(email).await
    }

    /// Session-authenticated equivalent used from the admin dashboard.
    pub async fn unsubscribe_by_admin(&self, email: &str) -> Result<(), NewsletterError> {
        self.apply_unsubscribe(email).await
    }

    async fn apply_unsubscribe(&self, email: &str) -> Result<(), NewsletterError> {
        let affected = self.repository.mark_unsubscribed(email).await?;
        if affected == 0 {
            return Err(NewsletterError::NotFound);
        }
        tracing::info!(%email, "unsubscribed");
        Ok(())
    }

    pub async fn list_active(&self) -> Result<Vec<Subscriber>, NewsletterError> {
        Ok(self.repository.list_active().await?)
    }

    pub async fn log_email(
        &self,
        subscriber_id: i64,
        subject: &str,
        status: &str,
    ) -> Result<(), NewsletterError> {
        self.repository
            .log_email(subscriber_id, subject, status)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::subscriber::Topics;
    use crate::repositories::subscriber_repository::MockSubscriberRepository;
    use mockall::predicate::*;

    fn signer() -> UnsubscribeSigner {
        UnsubscribeSigner::new("test-secret")
    }

    fn service(repo: MockSubscriberRepository) -> NewsletterService {
        NewsletterService::new(Arc::new(repo), signer(), None)
    }

    #[tokio::test]
    async fn subscribe_joins_topics_and_defaults_frequency() {
        let mut repo = MockSubscriberRepository::new();
        repo.expect_insert()
            .with(
                eq("A"),
                eq("a@x.com"),
                eq("weekly"),
                eq("SIP, Tax Planning"),
            )
            .times(1)
            .returning(|_, _, _, _| Box::pin(async { Ok(11) }));

        let sub = service(repo)
            .subscribe(SubscribeRequest {
                full_name: "A".to_string(),
                email: "a@x.com".to_string(),
                frequency: None,
                topics: Topics::Many(vec!["SIP".to_string(), "Tax Planning".to_string()]),
            })
            .await
            .expect("subscribe");
        assert_eq!(sub.id, 11);
        assert_eq!(sub.frequency, "weekly");
    }

    #[tokio::test]
    async fn subscribe_requires_name_and_email() {
        let result = service(MockSubscriberRepository::new())
            .subscribe(SubscribeRequest {
                full_name: String::new(),
                email: "a@x.com".to_string(),
                frequency: None,
                topics: Topics::default(),
            })
            .await;
        assert!(matches!(result, Err(NewsletterError::MissingFields)));
    }

    #[tokio::test]
    async fn duplicate_email_is_reported() {
        let mut repo = MockSubscriberRepository::new();
        repo.expect_insert()
            .returning(|_, _, _, _| Box::pin(async { Err(RepositoryError::AlreadyExists) }));

        let result = service(repo)
            .subscribe(SubscribeRequest {
                full_name: "A".to_string(),
                email: "a@x.com".to_string(),
                frequency: None,
                topics: Topics::default(),
            })
            .await;
        assert!(matches!(result, Err(NewsletterError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn unsubscribe_rejects_bad_token_without_touching_db() {
        let repo = MockSubscriberRepository::new();
        let result = service(repo)
            .unsubscribe_with_token("a@x.com", "deadbeef")
            .await;
        assert!(matches!(result, Err(NewsletterError::InvalidLink)));
    }

    #[tokio::test]
    async fn unsubscribe_with_valid_token_flips_status() {
        let mut repo = MockSubscriberRepository::new();
        repo.expect_mark_unsubscribed()
            .with(eq("a@x.com"))
            .times(1)
            .returning(|_| Box::pin(async { Ok(1) }));

        let token = signer().token_for("a@x.com");
        service(repo)
            .unsubscribe_with_token("a@x.com", &token)
            .await
            .expect("unsubscribe");
    }

    #[tokio::test]
    async fn unsubscribe_unknown_email_is_not_found() {
        let mut repo = MockSubscriberRepository::new();
        repo.expect_mark_unsubscribed()
            .returning(|_| Box::pin(async { Ok(0) }));

        let token = signer().token_for("ghost@x.com");
        let result = service(repo)
            .unsubscribe_with_token("ghost@x.com", &token)
            .await;
        assert!(matches!(result, Err(NewsletterError::NotFound)));
    }
}
