pub mod blog;
pub mod email_log;
pub mod fund;
pub mod lead;
pub mod subscriber;
pub mod user;

pub use blog::{Blog, PublishBlogRequest};
pub use email_log::EmailLogEntry;
pub use fund::MutualFund;
pub use lead::{GroupCount, Lead, LeadStats, NewLead, SubmitLeadRequest, UpdateLeadRequest};
pub use subscriber::{SubscribeRequest, Subscriber};
pub use user::{Role, User};
