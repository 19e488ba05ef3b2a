pub mod auth_service;
pub mod blog_service;
pub mod broadcast;
pub mod lead_service;
pub mod newsletter_service;
pub mod sanitizer;
pub mod unsubscribe;
pub mod user_service;

pub use auth_service::AuthService;
pub use blog_service::BlogService;
pub use broadcast::BroadcastDispatcher;
pub use lead_service::LeadService;
pub use newsletter_service::NewsletterService;
pub use unsubscribe::UnsubscribeSigner;
pub use user_service::UserService;
