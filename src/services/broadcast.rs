//! Fire-and-forget newsletter broadcast.
//!
//! After a blog is stored, one batched payload — the post plus every active
//! subscriber, each carrying a personal unsubscribe link — is POSTed to the
//! configured automation webhook, which fans out the individual emails.
//! Collapsing N sends into one push trades delivery guarantees for
//! simplicity: publish correctness never depends on the broadcast, so
//! failures are logged and never retried or surfaced.

use crate::models::subscriber::Subscriber;
use crate::repositories::SubscriberRepository;
use crate::services::blog_service::PublishedBlog;
use crate::services::unsubscribe::UnsubscribeSigner;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const BROADCAST_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Clone)]
pub struct BroadcastDispatcher {
    client: reqwest::Client,
    webhook_url: Option<String>,
    app_url: String,
    signer: UnsubscribeSigner,
    subscribers: Arc<dyn SubscriberRepository>,
}

impl BroadcastDispatcher {
    pub fn new(
        webhook_url: Option<String>,
        app_url: String,
        signer: UnsubscribeSigner,
        subscribers: Arc<dyn SubscriberRepository>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(BROADCAST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            webhook_url,
            app_url,
            signer,
            subscribers,
        }
    }

    /// Detaches the broadcast onto the runtime. The publish handler calls
    /// this after its response is already decided and never observes the
    /// outcome.
    pub fn spawn(&self, blog: PublishedBlog) {
        let dispatcher = self.clone();
        tokio::spawn(async move {
            dispatcher.dispatch(blog).await;
        });
    }

    pub async fn dispatch(&self, blog: PublishedBlog) {
        let Some(webhook_url) = &self.webhook_url else {
            tracing::warn!("broadcast webhook not configured; skipping newsletter broadcast");
            return;
        };

        let subscribers = match self.subscribers.list_active().await {
            Ok(subscribers) => subscribers,
            Err(e) => {
                tracing::error!("failed to fetch subscribers for broadcast: {e}");
                return;
            }
        };

        if subscribers.is_empty() {
            tracing::info!("no active subscribers; skipping broadcast");
            return;
        }

        tracing::info!(
            blog_id = blog.id,
            recipients = subscribers.len(),
            "broadcasting blog to subscribers"
        );

        let payload = self.payload(&blog, &subscribers);

        match self.client.post(webhook_url).json(&payload).send().await {
            Ok(_) => tracing::info!(blog_id = blog.id, "broadcast webhook fired"),
            Err(e) => tracing::warn!(blog_id = blog.id, "broadcast webhook failed: {e}"),
        }
    }

    /// One payload for the whole fan-out: the full post plus every recipient
    /// with a personal unsubscribe URL.
    fn payload(&self, blog: &PublishedBlog, subscribers: &[Subscriber]) -> Value {
        json!({
            "blog": {
                "id": blog.id,
                "title": blog.title,
                "category": blog.category.as_deref().unwrap_or(""),
                "content": blog.content,
                "image_url": blog.image_url.as_deref().unwrap_or(""),
                "reference_link": blog.reference_link.as_deref().unwrap_or(""),
                "nj_link": blog.nj_link.as_deref().unwrap_or(""),
                "published_at": chrono::Utc::now().to_rfc3339(),
            },
            "subscribers": subscribers
                .iter()
                .map(|sub| {
                    json!({
                        "id": sub.id,
                        "full_name": sub.full_name,
                        "email": sub.email,
                        "frequency": sub.frequency,
                        "topics": sub.topics,
                        "unsubscribe_url": self.signer.unsubscribe_url(&self.app_url, &sub.email),
                    })
                })
                .collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::subscriber_repository::MockSubscriberRepository;

    fn subscriber(id: i64, email: &str) -> Subscriber {
        Subscriber {
            id,
            full_name: format!("Reader {id}"),
            email: email.to_string(),
            frequency: "weekly".to_string(),
            topics: "SIP".to_string(),
            status: "active".to_string(),
            subscribed_at: "2026-01-01 00:00:00".to_string(),
            updated_at: "2026-01-01 00:00:00".to_string(),
        }
    }

    fn blog() -> PublishedBlog {
        PublishedBlog {
            id: 9,
            title: "Why SIPs Win".to_string(),
            content: "<p>Compounding.</p>".to_string(),
            image_url: None,
            reference_link: None,
            category: Some("Market Insight".to_string()),
            nj_link: None,
        }
    }

    fn dispatcher(webhook: Option<String>) -> BroadcastDispatcher {
        BroadcastDispatcher::new(
            webhook,
            "https://retirewise.example".to_string(),
            UnsubscribeSigner::new("test-secret"),
            Arc::new(MockSubscriberRepository::new()),
        )
    }

    #[test]
    fn payload_carries_blog_and_personal_unsubscribe_urls() {
        let dispatcher = dispatcher(Some("https://hooks.example/b".to_string()));
        let subscribers = vec![subscriber(1, "a@x.com"), subscriber(2, "b@x.com")];

        let payload = dispatcher.payload(&blog(), &subscribers);

        assert_eq!(payload["blog"]["id"], 9);
        assert_eq!(payload["blog"]["title"], "Why SIPs Win");
        assert_eq!(payload["blog"]["nj_link"], "");
        let subs = payload["subscribers"].as_array().expect("array");
        assert_eq!(subs.len(), 2);

        let signer = UnsubscribeSigner::new("test-secret");
        let url = subs[0]["unsubscribe_url"].as_str().expect("url");
        assert!(url.starts_with("https://retirewise.example/unsubscribe?email=a%40x.com&token="));
        let token = url.rsplit('=').next().unwrap();
        assert!(signer.verify("a@x.com", token));
    }

    #[tokio::test]
    async fn dispatch_without_webhook_never_queries_subscribers() {
        // MockSubscriberRepository with no expectations panics when touched.
        dispatcher(None).dispatch(blog()).await;
    }
}
