//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// User entity
///
/// `encrypted_password` is never serialized, whoever the caller is.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub encrypted_password: String,
    #[serde(rename = "gravatarURL")]
    pub gravatar_url: String,
    pub deleted: bool,
    pub admin: bool,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New user creation payload, as handed to the store
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub encrypted_password: String,
    pub gravatar_url: String,
}

/// User update payload; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub encrypted_password: Option<String>,
    pub gravatar_url: Option<String>,
    pub deleted: Option<bool>,
}

impl UpdateUser {
    pub fn deleted(deleted: bool) -> Self {
        Self {
            deleted: Some(deleted),
            ..Self::default()
        }
    }

    pub fn gravatar_url(url: impl Into<String>) -> Self {
        Self {
            gravatar_url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn encrypted_password(hash: impl Into<String>) -> Self {
        Self {
            encrypted_password: Some(hash.into()),
            ..Self::default()
        }
    }

    /// Apply the present fields to `user`
    pub fn apply_to(&self, user: &mut User) {
        if let Some(ref hash) = self.encrypted_password {
            user.encrypted_password = hash.clone();
        }
        if let Some(ref url) = self.gravatar_url {
            user.gravatar_url = url.clone();
        }
        if let Some(deleted) = self.deleted {
            user.deleted = deleted;
        }
    }
}

/// Signup request.
///
/// Fields are raw JSON values so that presence and type are both reported
/// by the validation rules rather than by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    pub email: Option<Value>,
    pub password: Option<Value>,
    pub username: Option<Value>,
}

/// Soft-delete request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoveProfileRequest {
    pub id: Option<Value>,
}

/// Restore request: the account email plus a password attempt
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestoreProfileRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Avatar recomputation request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshAvatarRequest {
    pub email: Option<String>,
}

/// Avatar overwrite request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAvatarRequest {
    #[serde(rename = "gravatarURL")]
    pub gravatar_url: Option<String>,
}

/// Password change request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangePasswordRequest {
    pub id: Option<String>,
    pub password: Option<String>,
}
