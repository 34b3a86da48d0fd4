//! Avatar URL resolution

use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::error::{AccountError, AccountResult};

const GRAVATAR_BASE_URL: &str = "https://www.gravatar.com/avatar";

/// Maps an email address to an avatar image URL
pub trait AvatarResolver: Send + Sync {
    fn resolve(&self, email: &str) -> AccountResult<String>;
}

/// Optional gravatar query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GravatarSettings {
    /// Image size in pixels (`s`)
    pub size: Option<u16>,
    /// Fallback image keyword or URL (`d`)
    pub default_image: Option<String>,
    /// Maximum rating (`r`)
    pub rating: Option<String>,
}

/// Gravatar URLs keyed by the SHA-256 of the normalized email
#[derive(Debug, Clone, Default)]
pub struct GravatarResolver {
    settings: GravatarSettings,
}

impl GravatarResolver {
    pub fn new(settings: GravatarSettings) -> Self {
        Self { settings }
    }

    fn query(&self) -> String {
        let mut params = Vec::new();
        if let Some(size) = self.settings.size {
            params.push(format!("s={}", size));
        }
        if let Some(ref default_image) = self.settings.default_image {
            params.push(format!("d={}", urlencoding::encode(default_image)));
        }
        if let Some(ref rating) = self.settings.rating {
            params.push(format!("r={}", urlencoding::encode(rating)));
        }

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

impl AvatarResolver for GravatarResolver {
    fn resolve(&self, email: &str) -> AccountResult<String> {
        let normalized = email.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(AccountError::Avatar(
                "An email address is required to resolve an avatar".to_string(),
            ));
        }

        let digest = hex::encode(Sha256::digest(normalized.as_bytes()));
        Ok(format!("{}/{}{}", GRAVATAR_BASE_URL, digest, self.query()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_deterministic_and_normalized() {
        let resolver = GravatarResolver::default();
        let url = resolver.resolve("a@example.com").unwrap();

        assert!(url.starts_with("https://www.gravatar.com/avatar/"));
        assert_eq!(url.len(), GRAVATAR_BASE_URL.len() + 1 + 64);
        assert_eq!(resolver.resolve("  A@Example.COM ").unwrap(), url);
        assert_ne!(resolver.resolve("b@example.com").unwrap(), url);
    }

    #[test]
    fn test_resolve_known_digest() {
        let resolver = GravatarResolver::default();
        let expected = hex::encode(Sha256::digest(b"a@example.com"));
        assert_eq!(
            resolver.resolve("a@example.com").unwrap(),
            format!("https://www.gravatar.com/avatar/{}", expected)
        );
    }

    #[test]
    fn test_resolve_with_query_parameters() {
        let resolver = GravatarResolver::new(GravatarSettings {
            size: Some(200),
            default_image: Some("https://example.com/fallback.png".to_string()),
            rating: Some("pg".to_string()),
        });

        let url = resolver.resolve("a@example.com").unwrap();
        assert!(url.ends_with("?s=200&d=https%3A%2F%2Fexample.com%2Ffallback.png&r=pg"));
    }

    #[test]
    fn test_blank_email_fails() {
        let resolver = GravatarResolver::default();
        assert!(matches!(resolver.resolve("   "), Err(AccountError::Avatar(_))));
    }
}
