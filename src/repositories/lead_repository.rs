use crate::models::lead::{GroupCount, Lead, NewLead};
use crate::repositories::{map_unique_violation, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait LeadRepository: Send + Sync {
    /// Inserts a validated lead. The UNIQUE constraints on phone and email are
    /// the authoritative duplicate check; `exists_with_phone_or_email` is only
    /// a courtesy pre-check and concurrent submissions may still race to the
    /// constraint.
    async fn insert(&self, lead: &NewLead) -> RepositoryResult<i64>;
    async fn exists_with_phone_or_email(&self, phone: &str, email: &str)
        -> RepositoryResult<bool>;
    async fn list(&self) -> RepositoryResult<Vec<Lead>>;
    async fn get(&self, id: i64) -> RepositoryResult<Option<Lead>>;
    async fn update(&self, id: i64, status: &str, notes: Option<&str>) -> RepositoryResult<()>;
    async fn count_by_status(&self) -> RepositoryResult<Vec<GroupCount>>;
    async fn count_by_age(&self) -> RepositoryResult<Vec<GroupCount>>;
    async fn count_by_goal(&self) -> RepositoryResult<Vec<GroupCount>>;
}

pub struct SqliteLeadRepository {
    pool: SqlitePool,
}

impl SqliteLeadRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const LEAD_COLUMNS: &str = "id, name, phone, email, age_group, has_existing_sip, \
    current_sip_amount, desired_investment_amount, objective, financial_goal, \
    goal_timeline, city, status, notes, created_at, updated_at";

#[async_trait]
impl LeadRepository for SqliteLeadRepository {
    async fn insert(&self, lead: &NewLead) -> RepositoryResult<i64> {
        let result = sqlx::query(
            "INSERT INTO leads \
               (name, phone, email, age_group, has_existing_sip, current_sip_amount, \
                desired_investment_amount, objective, financial_goal, goal_timeline, \
                city, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'new', datetime('now'), datetime('now'))",
        )
        .bind(&lead.name)
        .bind(&lead.phone)
        .bind(&lead.email)
        .bind(&lead.age_group)
        .bind(&lead.has_existing_sip)
        .bind(&lead.current_sip_amount)
        .bind(&lead.desired_investment_amount)
        .bind(&lead.objective)
        .bind(&lead.financial_goal)
        .bind(&lead.goal_timeline)
        .bind(&lead.city)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(result.last_insert_rowid())
    }

    async fn exists_with_phone_or_email(
        &self,
        phone: &str,
        email: &str,
    ) -> RepositoryResult<bool> {
        let hit = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM leads WHERE phone = ? OR email = ? LIMIT 1",
        )
        .bind(phone)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hit.is_some())
    }

    async fn list(&self) -> RepositoryResult<Vec<Lead>> {
        let leads = sqlx::query_as::<_, Lead>(&format!(
            "SELECT {LEAD_COLUMNS} FROM leads ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(leads)
    }

    async fn get(&self, id: i64) -> RepositoryResult<Option<Lead>> {
        let lead = sqlx::query_as::<_, Lead>(&format!(
            "SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lead)
    }

    async fn update(&self, id: i64, status: &str, notes: Option<&str>) -> RepositoryResult<()> {
        let result = sqlx::query(
            "UPDATE leads SET status = ?, notes = ?, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(status)
        .bind(notes)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn count_by_status(&self) -> RepositoryResult<Vec<GroupCount>> {
        let rows = sqlx::query_as::<_, GroupCount>(
            "SELECT status AS label, COUNT(*) AS count FROM leads GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count_by_age(&self) -> RepositoryResult<Vec<GroupCount>> {
        let rows = sqlx::query_as::<_, GroupCount>(
            "SELECT age_group AS label, COUNT(*) AS count FROM leads GROUP BY age_group",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count_by_goal(&self) -> RepositoryResult<Vec<GroupCount>> {
        let rows = sqlx::query_as::<_, GroupCount>(
            "SELECT financial_goal AS label, COUNT(*) AS count FROM leads \
             GROUP BY financial_goal ORDER BY count DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
