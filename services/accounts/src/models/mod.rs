//! Accounts service models

pub mod user;

// Re-export for convenience
pub use user::{
    ChangePasswordRequest, NewUser, RefreshAvatarRequest, RemoveProfileRequest,
    RestoreProfileRequest, SignupRequest, UpdateAvatarRequest, UpdateUser, User,
};
