use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MutualFund {
    pub id: i64,
    pub fund_name: String,
    pub fund_house: String,
    pub category: String,
    pub risk_level: String,
    pub assumed_return: f64,
}

impl MutualFund {
    pub async fn list(pool: &sqlx::SqlitePool) -> Result<Vec<MutualFund>, sqlx::Error> {
        sqlx::query_as::<_, MutualFund>(
            "SELECT id, fund_name, fund_house, category, risk_level, assumed_return \
             FROM mutual_funds ORDER BY fund_name",
        )
        .fetch_all(pool)
        .await
    }
}

