use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A consultation request captured from the public funnel.
///
/// Leads are never hard-deleted; admins move them through the status pipeline
/// (new, contacted, converted, rejected) instead.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub age_group: Option<String>,
    pub has_existing_sip: Option<String>,
    pub current_sip_amount: Option<String>,
    pub desired_investment_amount: Option<String>,
    pub objective: Option<String>,
    pub financial_goal: Option<String>,
    pub goal_timeline: Option<String>,
    pub city: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitLeadRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub age_group: Option<String>,
    pub has_existing_sip: Option<String>,
    pub current_sip_amount: Option<String>,
    pub desired_investment_amount: Option<String>,
    pub objective: Option<String>,
    pub financial_goal: Option<String>,
    pub goal_timeline: Option<String>,
    pub city: Option<String>,
}

/// A validated submission, ready for insertion.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub age_group: Option<String>,
    pub has_existing_sip: Option<String>,
    pub current_sip_amount: Option<String>,
    pub desired_investment_amount: Option<String>,
    pub objective: Option<String>,
    pub financial_goal: Option<String>,
    pub goal_timeline: Option<String>,
    pub city: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLeadRequest {
    pub status: String,
    pub notes: Option<String>,
}

/// Status aggregation with zero-filled buckets for every known status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeadStats {
    pub total: i64,
    pub new: i64,
    pub contacted: i64,
    pub converted: i64,
    pub rejected: i64,
}

/// Grouped count rows for the by-age / by-goal breakdowns.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GroupCount {
    pub label: Option<String>,
    pub count: i64,
}
