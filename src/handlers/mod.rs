pub mod auth_handlers;
pub mod blog_handlers;
pub mod fund_handlers;
pub mod lead_handlers;
pub mod newsletter_handlers;
pub mod page_handlers;

pub use auth_handlers::{admin_login, admin_logout, login, signup};
pub use blog_handlers::{blog_page, delete_blog, list_blogs, publish_blog};
pub use fund_handlers::list_funds;
pub use lead_handlers::{
    get_lead, lead_stats, leads_by_age, leads_by_goal, list_leads, submit_lead, update_lead,
};
pub use newsletter_handlers::{
    admin_unsubscribe, list_subscribers, log_email, subscribe, unsubscribe_page,
};
pub use page_handlers::{
    about, admin_dashboard_page, admin_login_page, calculator_page, funds_page, health, home,
    lead_page, learn_hub, learn_module, newsletter_page, not_found, privacy, robots_txt, terms,
    tools_page,
};
