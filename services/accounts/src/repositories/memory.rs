//! In-memory user repository (for development/testing)

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::{EMAIL_UNIQUE_CONSTRAINT, USERNAME_UNIQUE_CONSTRAINT, UserStore};
use crate::models::{NewUser, UpdateUser, User};

/// `HashMap`-backed store enforcing the same unique constraints as the
/// `users` table
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, new_user: NewUser) -> DatabaseResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == new_user.email) {
            return Err(DatabaseError::UniqueViolation {
                constraint: EMAIL_UNIQUE_CONSTRAINT.to_string(),
            });
        }

        if users.values().any(|u| u.username == new_user.username) {
            return Err(DatabaseError::UniqueViolation {
                constraint: USERNAME_UNIQUE_CONSTRAINT.to_string(),
            });
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            username: new_user.username,
            encrypted_password: new_user.encrypted_password,
            gravatar_url: new_user.gravatar_url,
            deleted: false,
            admin: false,
            banned: false,
            created_at: now,
            updated_at: now,
        };

        users.insert(user.id, user.clone());

        info!(user_id = %user.id, username = %user.username, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_all(&self) -> DatabaseResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(result)
    }

    async fn update(&self, id: Uuid, changes: UpdateUser) -> DatabaseResult<Option<User>> {
        let mut users = self.users.write().await;

        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };

        changes.apply_to(user);
        user.updated_at = Utc::now();

        info!(user_id = %id, "Updated user");
        Ok(Some(user.clone()))
    }
}
