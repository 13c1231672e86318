use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use sqlx::{Pool, Postgres};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{IdentityError, Result};
use crate::models::{UserAccount, UserRow};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new account; a taken email yields [`IdentityError::UserAlreadyExists`]
    async fn create_user(&self, user: &UserAccount) -> Result<UserAccount>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>>;
    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<()>;
    /// Remove the account with this id; `false` when it was already gone
    async fn delete_user(&self, id: Uuid) -> Result<bool>;
}

/// PostgreSQL-backed user repository
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: Pool<Postgres>,
}

impl PgUserRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, user: &UserAccount) -> Result<UserAccount> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (id, email, password_hash, role, is_active, created_at, last_login)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, email, password_hash, role, is_active, created_at, last_login
            ",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.authority())
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.last_login)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                IdentityError::UserAlreadyExists
            }
            _ => IdentityError::DatabaseError(e),
        })?;

        UserAccount::try_from(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, password_hash, role, is_active, created_at, last_login
            FROM users WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserAccount::try_from).transpose()
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<()> {
        sqlx::query("UPDATE users SET last_login = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// In-memory implementation for development/testing
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, UserAccount>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: &UserAccount) -> Result<UserAccount> {
        let mut users = self.users.write();
        if users.contains_key(&user.email) {
            return Err(IdentityError::UserAlreadyExists);
        }
        users.insert(user.email.clone(), user.clone());
        Ok(user.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        Ok(self.users.read().get(email).cloned())
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<()> {
        if let Some(user) = self.users.write().values_mut().find(|u| u.id == id) {
            user.last_login = Some(at);
        }
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        let mut users = self.users.write();
        let email = users.values().find(|u| u.id == id).map(|u| u.email.clone());
        Ok(email.and_then(|email| users.remove(&email)).is_some())
    }
}
