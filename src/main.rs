use retirewise::{
    auth::token::JwtKeys,
    config::{validate_production_config, AppConfig},
    db, repositories, router, services, AppState,
};

use repositories::{
    blog_repository::SqliteBlogRepository, lead_repository::SqliteLeadRepository,
    subscriber_repository::SqliteSubscriberRepository, user_repository::SqliteUserRepository,
};
use services::{
    auth_service::AuthService, blog_service::BlogService, broadcast::BroadcastDispatcher,
    lead_service::LeadService, newsletter_service::NewsletterService,
    unsubscribe::UnsubscribeSigner, user_service::UserService,
};
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "retirewise=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    validate_production_config();
    let config = Arc::new(AppConfig::from_env());
    let jwt = JwtKeys::new(&config.jwt_secret);
    let signer = UnsubscribeSigner::new(&config.unsubscribe_secret);

    // Database connection
    let pool = db::create_pool().await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Initialize repositories
    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let lead_repository = Arc::new(SqliteLeadRepository::new(pool.clone()));
    let subscriber_repository = Arc::new(SqliteSubscriberRepository::new(pool.clone()));
    let blog_repository = Arc::new(SqliteBlogRepository::new(pool.clone()));

    // Initialize services
    let user_service = Arc::new(UserService::new(user_repository.clone()));
    let auth_service = Arc::new(AuthService::new(user_repository.clone(), jwt.clone()));
    let lead_service = Arc::new(LeadService::new(
        lead_repository,
        config.default_lead_city.clone(),
    ));
    let newsletter_service = Arc::new(NewsletterService::new(
        subscriber_repository.clone(),
        signer.clone(),
        config.subscribe_webhook_url.clone(),
    ));
    let blog_service = Arc::new(BlogService::new(blog_repository));
    let broadcast = Arc::new(BroadcastDispatcher::new(
        config.broadcast_webhook_url.clone(),
        config.app_url.clone(),
        signer,
        subscriber_repository,
    ));

    if config.broadcast_webhook_url.is_none() {
        tracing::warn!("BROADCAST_WEBHOOK_URL not set — blog publishes will skip the broadcast");
    }

    let app_state = AppState {
        config,
        jwt,
        user_service,
        auth_service,
        lead_service,
        newsletter_service,
        blog_service,
        broadcast,
        pool: pool.clone(),
    };

    let app = router::build_router(app_state);

    // Start server
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "5000".to_string())
        .parse::<u16>()?;

    let addr = SocketAddr::from((host.parse::<std::net::IpAddr>()?, port));

    tracing::info!("RetireWise+ running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
