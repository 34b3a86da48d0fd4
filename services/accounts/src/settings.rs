//! Service settings loaded from the environment

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

use crate::avatar::GravatarSettings;

/// Accounts service settings
///
/// # Environment Variables
/// - `ACCOUNTS__HOST`: bind host (default: "0.0.0.0")
/// - `ACCOUNTS__PORT`: bind port (default: 3000)
/// - `ACCOUNTS__GRAVATAR__SIZE`: avatar size in pixels
/// - `ACCOUNTS__GRAVATAR__DEFAULT_IMAGE`: fallback image keyword or URL
/// - `ACCOUNTS__GRAVATAR__RATING`: maximum avatar rating
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub gravatar: GravatarSettings,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .add_source(
                Environment::with_prefix("ACCOUNTS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to load accounts settings")?
            .try_deserialize()
            .context("Invalid accounts settings")
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "ACCOUNTS__HOST",
        "ACCOUNTS__PORT",
        "ACCOUNTS__GRAVATAR__SIZE",
        "ACCOUNTS__GRAVATAR__DEFAULT_IMAGE",
        "ACCOUNTS__GRAVATAR__RATING",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn test_settings_defaults() {
        clear_env();

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.bind_address(), "0.0.0.0:3000");
        assert!(settings.gravatar.size.is_none());
        assert!(settings.gravatar.default_image.is_none());
        assert!(settings.gravatar.rating.is_none());
    }

    #[test]
    #[serial]
    fn test_settings_from_env_with_custom_values() {
        unsafe {
            std::env::set_var("ACCOUNTS__HOST", "127.0.0.1");
            std::env::set_var("ACCOUNTS__PORT", "8081");
            std::env::set_var("ACCOUNTS__GRAVATAR__SIZE", "128");
            std::env::set_var("ACCOUNTS__GRAVATAR__RATING", "pg");
        }

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.bind_address(), "127.0.0.1:8081");
        assert_eq!(settings.gravatar.size, Some(128));
        assert_eq!(settings.gravatar.rating.as_deref(), Some("pg"));

        clear_env();
    }
}
