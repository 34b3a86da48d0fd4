//! PostgreSQL user repository

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::UserStore;
use crate::models::{NewUser, UpdateUser, User};

const USER_COLUMNS: &str = "id, email, username, encrypted_password, gravatar_url, \
                            deleted, admin, banned, created_at, updated_at";

/// User repository backed by the `users` table
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the embedded migrations
    pub async fn migrate(&self) -> DatabaseResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;

        info!("User table migrations applied");
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, new_user: NewUser) -> DatabaseResult<User> {
        info!("Creating new user: {}", new_user.username);

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, username, encrypted_password, gravatar_url)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&new_user.email)
        .bind(&new_user.username)
        .bind(&new_user.encrypted_password)
        .bind(&new_user.gravatar_url)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        info!("Finding user by ID: {}", id);

        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        info!("Finding user by email: {}", email);

        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn find_all(&self) -> DatabaseResult<Vec<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at ASC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn update(&self, id: Uuid, changes: UpdateUser) -> DatabaseResult<Option<User>> {
        info!("Updating user: {}", id);

        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET encrypted_password = COALESCE($2, encrypted_password),
                gravatar_url = COALESCE($3, gravatar_url),
                deleted = COALESCE($4, deleted),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(changes.encrypted_password)
        .bind(changes.gravatar_url)
        .bind(changes.deleted)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }
}
