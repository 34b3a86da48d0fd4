//! Account lifecycle: signup, soft-delete/restore, avatar and password changes

use common::error::DatabaseError;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::avatar::{AvatarResolver, GravatarResolver, GravatarSettings};
use crate::error::{AccountError, AccountResult};
use crate::models::{
    ChangePasswordRequest, NewUser, RefreshAvatarRequest, RemoveProfileRequest,
    RestoreProfileRequest, SignupRequest, UpdateAvatarRequest, UpdateUser, User,
};
use crate::password::{Argon2Hasher, PasswordHasher};
use crate::repositories::{EMAIL_UNIQUE_CONSTRAINT, USERNAME_UNIQUE_CONSTRAINT, UserStore};
use crate::validation::{self, EmailValidator, RegexEmailValidator};

/// Account service over a user store and its three collaborators
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn UserStore>,
    email_validator: Arc<dyn EmailValidator>,
    password_hasher: Arc<dyn PasswordHasher>,
    avatar_resolver: Arc<dyn AvatarResolver>,
}

impl AccountService {
    pub fn new(
        store: Arc<dyn UserStore>,
        email_validator: Arc<dyn EmailValidator>,
        password_hasher: Arc<dyn PasswordHasher>,
        avatar_resolver: Arc<dyn AvatarResolver>,
    ) -> Self {
        Self {
            store,
            email_validator,
            password_hasher,
            avatar_resolver,
        }
    }

    /// Regex email validation, Argon2 hashing and Gravatar URLs
    pub fn with_defaults(store: Arc<dyn UserStore>, gravatar: GravatarSettings) -> Self {
        Self::new(
            store,
            Arc::new(RegexEmailValidator),
            Arc::new(Argon2Hasher::new()),
            Arc::new(GravatarResolver::new(gravatar)),
        )
    }

    /// Create an account after validating every field
    pub async fn signup(&self, request: SignupRequest) -> AccountResult<User> {
        let valid = validation::validate_signup(&request, self.email_validator.as_ref())?;

        let encrypted_password = self.password_hasher.hash(valid.password)?;
        let gravatar_url = self.avatar_resolver.resolve(valid.email)?;

        let new_user = NewUser {
            email: valid.email.to_string(),
            username: valid.username.to_string(),
            encrypted_password,
            gravatar_url,
        };

        let user = self
            .store
            .create(new_user)
            .await
            .map_err(conflict_or_database)?;

        info!(user_id = %user.id, username = %user.username, "Signed up user");
        Ok(user)
    }

    pub async fn get_profile(&self, id: &str) -> AccountResult<User> {
        let id = parse_id(id).ok_or(AccountError::NotFound)?;

        self.store
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound)
    }

    /// Soft-delete: flags the account, never removes the row
    pub async fn remove_profile(&self, request: RemoveProfileRequest) -> AccountResult<()> {
        // Falsy ids count as missing
        let id = match request.id {
            None | Some(Value::Bool(false)) => None,
            Some(Value::String(id)) if id.is_empty() => None,
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
            id => id,
        }
        .ok_or_else(|| AccountError::validation("id is a required parameter."))?;
        let id = id.as_str().and_then(parse_id).ok_or(AccountError::NotFound)?;

        self.store
            .update(id, UpdateUser::deleted(true))
            .await?
            .ok_or(AccountError::NotFound)?;

        info!(user_id = %id, "Removed profile");
        Ok(())
    }

    /// Undo a soft-delete given the account email and password.
    ///
    /// An unknown email and a wrong password both yield `NotFound`.
    pub async fn restore_profile(&self, request: RestoreProfileRequest) -> AccountResult<User> {
        let (Some(email), Some(attempt)) = (request.email.as_deref(), request.password.as_deref())
        else {
            return Err(AccountError::NotFound);
        };

        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AccountError::NotFound)?;

        if !self
            .password_hasher
            .verify(attempt, &user.encrypted_password)?
        {
            warn!(user_id = %user.id, "Rejected profile restore");
            return Err(AccountError::NotFound);
        }

        let restored = self
            .store
            .update(user.id, UpdateUser::deleted(false))
            .await?
            .ok_or(AccountError::NotFound)?;

        info!(user_id = %restored.id, "Restored profile");
        Ok(restored)
    }

    /// Recompute the avatar URL for an email without storing it
    pub fn refresh_avatar(&self, request: RefreshAvatarRequest) -> AccountResult<String> {
        self.avatar_resolver
            .resolve(request.email.as_deref().unwrap_or_default())
    }

    pub async fn update_avatar(
        &self,
        id: &str,
        request: UpdateAvatarRequest,
    ) -> AccountResult<User> {
        let gravatar_url = request
            .gravatar_url
            .ok_or_else(|| AccountError::validation("gravatarURL is a required parameter."))?;
        let id = parse_id(id).ok_or(AccountError::NotFound)?;

        self.store
            .update(id, UpdateUser::gravatar_url(gravatar_url))
            .await?
            .ok_or(AccountError::NotFound)
    }

    pub async fn change_password(&self, request: ChangePasswordRequest) -> AccountResult<User> {
        let password = validation::validate_password(request.password.as_deref())?;
        let id = request
            .id
            .as_deref()
            .and_then(parse_id)
            .ok_or(AccountError::NotFound)?;

        let encrypted_password = self.password_hasher.hash(password)?;

        let user = self
            .store
            .update(id, UpdateUser::encrypted_password(encrypted_password))
            .await?
            .ok_or(AccountError::NotFound)?;

        info!(user_id = %user.id, "Changed password");
        Ok(user)
    }

    /// Every account, including soft-deleted ones
    pub async fn list_all_users(&self) -> AccountResult<Vec<User>> {
        Ok(self.store.find_all().await?)
    }
}

/// Ids that are not UUIDs cannot match any record
fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

fn conflict_or_database(err: DatabaseError) -> AccountError {
    match err.violated_constraint() {
        Some(EMAIL_UNIQUE_CONSTRAINT) => AccountError::EmailInUse,
        Some(USERNAME_UNIQUE_CONSTRAINT) => AccountError::UsernameInUse,
        _ => AccountError::Database(err),
    }
}
