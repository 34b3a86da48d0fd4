//! Input validation utilities

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::error::{AccountError, AccountResult};
use crate::models::SignupRequest;

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_USERNAME_LENGTH: usize = 6;
const MAX_EMAIL_LENGTH: usize = 254;

const INVALID_USERNAME: &str = "Invalid username: must consist of numbers and letters only.";

/// Classifies strings as syntactically valid email addresses
pub trait EmailValidator: Send + Sync {
    fn is_valid(&self, email: &str) -> bool;
}

/// Regex-backed email syntax check
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexEmailValidator;

impl EmailValidator for RegexEmailValidator {
    fn is_valid(&self, email: &str) -> bool {
        if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
            return false;
        }

        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*\.[a-zA-Z]{2,}$")
                .expect("Failed to compile email regex")
        });

        regex.is_match(email)
    }
}

/// Signup fields that passed validation
#[derive(Debug, Clone, Copy)]
pub struct ValidSignup<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub username: &'a str,
}

/// Validate a signup request; the first failing rule wins.
///
/// A non-string password counts as missing. A non-string username fails the
/// alphabet rule and a non-string email fails the syntax rule, each at its
/// usual position in the order.
pub fn validate_signup<'a>(
    request: &'a SignupRequest,
    email_validator: &dyn EmailValidator,
) -> AccountResult<ValidSignup<'a>> {
    let email = request
        .email
        .as_ref()
        .ok_or_else(|| AccountError::validation("An email address is required!"))?;

    let password = validate_password(request.password.as_ref().and_then(Value::as_str))?;

    let username = match request.username.as_ref().map(Value::as_str) {
        Some(None) => return Err(AccountError::validation(INVALID_USERNAME)),
        username => validate_username(username.flatten())?,
    };

    let email = email
        .as_str()
        .filter(|email| email_validator.is_valid(email))
        .ok_or_else(|| AccountError::validation("Doesn't look like an email address to me!"))?;

    Ok(ValidSignup {
        email,
        password,
        username,
    })
}

/// Validate password presence and length.
///
/// Length is counted in `char`s (Unicode scalar values), so a character
/// outside the Basic Multilingual Plane counts once, not as a UTF-16 pair.
pub fn validate_password(password: Option<&str>) -> AccountResult<&str> {
    let password = password.ok_or_else(|| AccountError::validation("A password is required!"))?;

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AccountError::validation(
            "Password must be at least 6 characters!",
        ));
    }

    Ok(password)
}

/// Validate username presence, length and alphabet.
///
/// Length is counted in `char`s like [`validate_password`].
pub fn validate_username(username: Option<&str>) -> AccountResult<&str> {
    let username = username.ok_or_else(|| AccountError::validation("A username is required!"))?;

    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(AccountError::validation(
            "Username must be at least 6 characters!",
        ));
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err(AccountError::validation(INVALID_USERNAME));
    }

    Ok(username)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls so tests can assert the validator was never reached
    #[derive(Default)]
    struct CountingValidator {
        calls: AtomicUsize,
    }

    impl EmailValidator for CountingValidator {
        fn is_valid(&self, _email: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            true
        }
    }

    fn request(
        email: Option<&str>,
        password: Option<&str>,
        username: Option<&str>,
    ) -> SignupRequest {
        SignupRequest {
            email: email.map(Value::from),
            password: password.map(Value::from),
            username: username.map(Value::from),
        }
    }

    fn message(result: AccountResult<ValidSignup<'_>>) -> String {
        match result {
            Err(AccountError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_regex_email_validator() {
        let validator = RegexEmailValidator;
        assert!(validator.is_valid("a@example.com"));
        assert!(validator.is_valid("first.last+tag@mail.example.co.uk"));
        assert!(!validator.is_valid(""));
        assert!(!validator.is_valid("not-an-email"));
        assert!(!validator.is_valid("a@b"));
        assert!(!validator.is_valid("a b@example.com"));
        assert!(!validator.is_valid(&format!("{}@example.com", "a".repeat(250))));
    }

    #[test]
    fn test_signup_validation_order() {
        let validator = CountingValidator::default();

        let cases = [
            (request(None, None, None), "An email address is required!"),
            (
                request(Some("a@example.com"), None, None),
                "A password is required!",
            ),
            (
                request(Some("a@example.com"), Some("12345"), None),
                "Password must be at least 6 characters!",
            ),
            (
                request(Some("a@example.com"), Some("secret1"), None),
                "A username is required!",
            ),
            (
                request(Some("a@example.com"), Some("secret1"), Some("ab")),
                "Username must be at least 6 characters!",
            ),
            (
                request(Some("a@example.com"), Some("secret1"), Some("bad name!")),
                "Invalid username: must consist of numbers and letters only.",
            ),
        ];

        for (req, expected) in cases {
            assert_eq!(message(validate_signup(&req, &validator)), expected);
        }

        assert_eq!(validator.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_username_alphabet_checked_regardless_of_length() {
        for username in ["valid_name", "abcdefghijklmnop-", "ümlaut123", "tab\tname12"] {
            assert_eq!(
                validate_username(Some(username)).unwrap_err().to_string(),
                "Invalid username: must consist of numbers and letters only."
            );
        }
        assert_eq!(validate_username(Some("MixedCase42")).unwrap(), "MixedCase42");
    }

    #[test]
    fn test_invalid_email_reported_last() {
        let req = request(Some("nope"), Some("secret1"), Some("validname"));
        assert_eq!(
            message(validate_signup(&req, &RegexEmailValidator)),
            "Doesn't look like an email address to me!"
        );
    }

    #[test]
    fn test_valid_signup() {
        let req = request(Some("a@example.com"), Some("secret1"), Some("validname"));
        let valid = validate_signup(&req, &RegexEmailValidator).unwrap();
        assert_eq!(valid.email, "a@example.com");
        assert_eq!(valid.password, "secret1");
        assert_eq!(valid.username, "validname");
    }

    #[test]
    fn test_password_length_counts_characters() {
        assert!(validate_password(Some("ééééé")).is_err());
        assert!(validate_password(Some("éééééé")).is_ok());
        assert_eq!(
            validate_password(None).unwrap_err().to_string(),
            "A password is required!"
        );
    }

    #[test]
    fn test_password_length_counts_chars_not_utf16_units() {
        // Each emoji is one char but two UTF-16 code units
        assert!(validate_password(Some("😀😀😀")).is_err());
        assert!(validate_password(Some("😀😀😀😀😀😀")).is_ok());
        assert!(validate_username(Some("𝟘𝟙𝟚𝟛𝟜")).is_err());
    }

    #[test]
    fn test_non_string_fields_follow_rule_order() {
        let validator = CountingValidator::default();
        let base = || SignupRequest {
            email: Some(Value::from("a@example.com")),
            password: Some(Value::from("secret1")),
            username: Some(Value::from("validname")),
        };

        let numeric_username = SignupRequest {
            username: Some(Value::from(12345678)),
            ..base()
        };
        assert_eq!(
            message(validate_signup(&numeric_username, &validator)),
            "Invalid username: must consist of numbers and letters only."
        );

        let array_username = SignupRequest {
            username: Some(serde_json::json!(["abcdefgh"])),
            ..base()
        };
        assert_eq!(
            message(validate_signup(&array_username, &validator)),
            "Invalid username: must consist of numbers and letters only."
        );

        let numeric_password = SignupRequest {
            password: Some(Value::from(1234567)),
            username: Some(Value::from(42)),
            ..base()
        };
        assert_eq!(
            message(validate_signup(&numeric_password, &validator)),
            "A password is required!"
        );

        assert_eq!(validator.calls.load(Ordering::SeqCst), 0);

        let numeric_email = SignupRequest {
            email: Some(Value::from(7)),
            ..base()
        };
        assert_eq!(
            message(validate_signup(&numeric_email, &RegexEmailValidator)),
            "Doesn't look like an email address to me!"
        );
    }
}
