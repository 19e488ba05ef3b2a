pub mod test_helpers {
    use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    use crate::auth::token::JwtKeys;
    use crate::config::AppConfig;
    use crate::repositories::{
        SqliteBlogRepository, SqliteLeadRepository, SqliteSubscriberRepository,
        SqliteUserRepository,
    };
    use crate::services::{
        AuthService, BlogService, BroadcastDispatcher, LeadService, NewsletterService,
        UnsubscribeSigner, UserService,
    };
    use crate::AppState;

    pub const TEST_JWT_SECRET: &str = "test-jwt-secret";
    pub const TEST_UNSUBSCRIBE_SECRET: &str = "test-unsubscribe-secret";

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }

    /// Create a temporary file-based SQLite database for testing
    pub async fn create_test_db_file() -> Result<(SqlitePool, NamedTempFile), sqlx::Error> {
        let temp_file = NamedTempFile::new().map_err(sqlx::Error::Io)?;
        let db_path = temp_file
            .path()
            .to_str()
            .ok_or_else(|| sqlx::Error::Configuration("Invalid database path".into()))?;
        let database_url = format!("sqlite://{}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok((pool, temp_file))
    }

    /// Insert a test user with hashed password
    pub async fn insert_test_user(
        pool: &SqlitePool,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<i64, sqlx::Error> {
        use argon2::{
            password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
            Argon2,
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                sqlx::Error::Configuration(format!("Password hashing failed: {}", e).into())
            })?
            .to_string();

        let result = sqlx::query(
            "INSERT INTO users (name, email, password_hash, role) VALUES (?, ?, ?, ?)",
        )
        .bind("Test User")
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Insert an active subscriber directly
    pub async fn insert_test_subscriber(
        pool: &SqlitePool,
        full_name: &str,
        email: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO newsletter_subscribers (full_name, email, frequency, topics, status) \
             VALUES (?, ?, 'weekly', '', 'active')",
        )
        .bind(full_name)
        .bind(email)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Full application state over the given pool, with deterministic test
    /// secrets and an injectable broadcast destination.
    pub fn build_test_state(pool: SqlitePool, broadcast_webhook_url: Option<String>) -> AppState {
        let config = Arc::new(AppConfig {
            environment: "test".to_string(),
            app_url: "http://localhost:5000".to_string(),
            jwt_secret: TEST_JWT_SECRET.to_string(),
            unsubscribe_secret: TEST_UNSUBSCRIBE_SECRET.to_string(),
            broadcast_webhook_url: broadcast_webhook_url.clone(),
            subscribe_webhook_url: None,
            default_lead_city: "Pune".to_string(),
        });

        let jwt = JwtKeys::new(&config.jwt_secret);
        let signer = UnsubscribeSigner::new(&config.unsubscribe_secret);

        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let lead_repository = Arc::new(SqliteLeadRepository::new(pool.clone()));
        let subscriber_repository = Arc::new(SqliteSubscriberRepository::new(pool.clone()));
        let blog_repository = Arc::new(SqliteBlogRepository::new(pool.clone()));

        AppState {
            jwt: jwt.clone(),
            user_service: Arc::new(UserService::new(user_repository.clone())),
            auth_service: Arc::new(AuthService::new(user_repository, jwt)),
            lead_service: Arc::new(LeadService::new(
                lead_repository,
                config.default_lead_city.clone(),
            )),
            newsletter_service: Arc::new(NewsletterService::new(
                subscriber_repository.clone(),
                signer.clone(),
                None,
            )),
            blog_service: Arc::new(BlogService::new(blog_repository)),
            broadcast: Arc::new(BroadcastDispatcher::new(
                broadcast_webhook_url,
                config.app_url.clone(),
                signer,
                subscriber_repository,
            )),
            config,
            pool,
        }
    }
}

// Re-export commonly used test functions at module level for convenience
#[cfg(test)]
pub async fn create_test_pool() -> sqlx::SqlitePool {
    match test_helpers::create_test_db().await {
        Ok(pool) => pool,
        Err(e) => panic!("Failed to create test pool: {}", e),
    }
}
