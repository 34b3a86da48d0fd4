//! Application state shared across handlers

use crate::service::AccountService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
}

impl AppState {
    pub fn new(account_service: AccountService) -> Self {
        Self { account_service }
    }
}
