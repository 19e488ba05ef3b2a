use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub frequency: String,
    pub topics: String,
    pub status: String,
    pub subscribed_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default, rename = "fullName")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    pub frequency: Option<String>,
    /// Accepts either a list of topics or a single pre-joined string.
    #[serde(default)]
    pub topics: Topics,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Topics {
    Many(Vec<String>),
    One(String),
}

impl Default for Topics {
    fn default() -> Self {
        Topics::One(String::new())
    }
}

impl Topics {
    pub fn joined(&self) -> String {
        match self {
            Topics::Many(list) => list.join(", "),
            Topics::One(s) => s.clone(),
        }
    }
}
