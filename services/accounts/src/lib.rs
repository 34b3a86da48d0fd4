//! Accounts service
//!
//! Signup, profile retrieval, soft-delete/restore, avatar management and
//! password changes over a single `users` table.
//!
//! ```text
//! routes ──▶ AccountService ──▶ UserStore (PostgreSQL / in-memory)
//!                 │
//!                 ├─▶ EmailValidator
//!                 ├─▶ PasswordHasher
//!                 └─▶ AvatarResolver
//! ```
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use accounts::{
//!     avatar::GravatarSettings, repositories::InMemoryUserStore, routes::create_router,
//!     service::AccountService, state::AppState,
//! };
//!
//! let service = AccountService::with_defaults(
//!     Arc::new(InMemoryUserStore::new()),
//!     GravatarSettings::default(),
//! );
//! let router = create_router(AppState::new(service));
//! ```

pub mod avatar;
pub mod error;
pub mod extract;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod service;
pub mod settings;
pub mod state;
pub mod validation;
