//! Repositories for user persistence

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{NewUser, UpdateUser, User};

pub mod memory;
pub mod user;

pub use memory::InMemoryUserStore;
pub use user::PgUserStore;

/// Name of the unique constraint on `users.email`
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";
/// Name of the unique constraint on `users.username`
pub const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_key";

/// Record-oriented user persistence
///
/// `create` reports duplicate emails and usernames as
/// `DatabaseError::UniqueViolation` carrying the constraint name.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user; the store assigns the id and timestamps
    async fn create(&self, new_user: NewUser) -> DatabaseResult<User>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>>;

    /// Find a user by exact email
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;

    /// All users, oldest first
    async fn find_all(&self) -> DatabaseResult<Vec<User>>;

    /// Apply `changes` to the user with `id`; `None` when nothing matched
    async fn update(&self, id: Uuid, changes: UpdateUser) -> DatabaseResult<Option<User>>;
}
