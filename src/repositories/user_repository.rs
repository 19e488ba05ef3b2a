use crate::models::user::User;
use crate::repositories::{map_unique_violation, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        locality: Option<&str>,
        password_hash: &str,
        role: &str,
    ) -> RepositoryResult<User>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>>;
    async fn update_password(&self, id: i64, password_hash: &str) -> RepositoryResult<()>;
    async fn set_role(&self, id: i64, role: &str) -> RepositoryResult<()>;
    async fn list_users(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<User>>;
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, name, email, phone, locality, password_hash, role, created_at";

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        locality: Option<&str>,
        password_hash: &str,
        role: &str,
    ) -> RepositoryResult<User> {
        let result = sqlx::query(
            "INSERT INTO users (name, email, phone, locality, password_hash, role) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(locality)
        .bind(password_hash)
        .bind(role)
        .execute(&self.pool)
        .await;

        match result {
            Ok(res) => {
                let id = res.last_insert_rowid();
                self.find_by_id(id).await?.ok_or(RepositoryError::NotFound)
            }
            Err(e) => Err(map_unique_violation(e)),
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> RepositoryResult<()> {
        let result = sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn set_role(&self, id: i64, role: &str) -> RepositoryResult<()> {
        let result = sqlx::query("UPDATE users SET role = ? WHERE id = ?")
            .bind(role)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_users(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
