use std::env;

/// Typed view of the process environment, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub app_url: String,
    pub jwt_secret: String,
    pub unsubscribe_secret: String,
    /// Outbound broadcast destination. Absent means blog publishes skip the
    /// newsletter broadcast entirely.
    pub broadcast_webhook_url: Option<String>,
    /// Optional signup notification webhook.
    pub subscribe_webhook_url: Option<String>,
    pub default_lead_city: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = current_environment();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using development default");
            "dev-jwt-secret".to_string()
        });

        let unsubscribe_secret = env::var("UNSUBSCRIBE_SECRET").unwrap_or_else(|_| {
            tracing::warn!("UNSUBSCRIBE_SECRET not set; using development default");
            "dev-unsubscribe-secret".to_string()
        });

        AppConfig {
            environment,
            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:5000".to_string()),
            jwt_secret,
            unsubscribe_secret,
            broadcast_webhook_url: env::var("BROADCAST_WEBHOOK_URL").ok(),
            subscribe_webhook_url: env::var("SUBSCRIBE_WEBHOOK_URL").ok(),
            default_lead_city: env::var("DEFAULT_LEAD_CITY")
                .unwrap_or_else(|_| "Pune".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

pub fn validate_production_config() {
    if current_environment() != "production" {
        return;
    }

    for key in ["JWT_SECRET", "UNSUBSCRIBE_SECRET"] {
        let secret = env::var(key)
            .unwrap_or_else(|_| panic!("FATAL: {key} must be set in production"));

        if secret.len() < 32 {
            panic!("FATAL: {key} must be at least 32 bytes in production");
        }

        let lowered = secret.to_ascii_lowercase();
        if lowered.contains("example") || lowered.contains("changeme") || lowered.contains("dev-") {
            panic!("FATAL: {key} appears to be a default value. Generate a secure secret!");
        }
    }
}

fn current_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
}
