//! Login form validation
//!
//! Runs before any network call; an invalid form never reaches the API.

use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::OnceLock;

pub const EMAIL_REQUIRED: &str = "Email address is required";
pub const EMAIL_INVALID: &str = "Invalid email address";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";

pub const MIN_PASSWORD_LEN: usize = 6;

const EMAIL_PATTERN: &str = r"^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$";

static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn email_regex() -> Option<&'static Regex> {
    EMAIL_REGEX
        .get_or_init(|| {
            RegexBuilder::new(EMAIL_PATTERN)
                .case_insensitive(true)
                .build()
                .map_err(|e| tracing::error!(error = %e, "Email pattern failed to compile"))
                .ok()
        })
        .as_ref()
}

/// Credentials as typed into the login form
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Per-field messages of a rejected form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = [self.email.as_deref(), self.password.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check both fields, collecting the first problem of each
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let errors = ValidationErrors {
            email: validate_email(&self.email).err().map(str::to_string),
            password: validate_password(&self.password).err().map(str::to_string),
        };

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Matched as typed; surrounding whitespace makes the address invalid
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.is_empty() {
        return Err(EMAIL_REQUIRED);
    }
    match email_regex() {
        Some(re) if re.is_match(email) => Ok(()),
        _ => Err(EMAIL_INVALID),
    }
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        Err(PASSWORD_REQUIRED)
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Err(PASSWORD_TOO_SHORT)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form() {
        assert!(LoginForm::new("admin@careoneclinics.com", "secret1").validate().is_ok());
        assert!(LoginForm::new("Admin.Ops+1@CareOne.CO", "123456").validate().is_ok());
    }

    #[test]
    fn test_padded_email_is_invalid() {
        assert_eq!(validate_email(" a@b.co "), Err(EMAIL_INVALID));
        assert_eq!(validate_email("a@b.co\n"), Err(EMAIL_INVALID));
        assert_eq!(validate_email("   "), Err(EMAIL_INVALID));
        assert_eq!(validate_email(""), Err(EMAIL_REQUIRED));
    }

    #[test]
    fn test_required_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.email.as_deref(), Some("Email address is required"));
        assert_eq!(errors.password.as_deref(), Some("Password is required"));
        assert_eq!(
            errors.to_string(),
            "Email address is required; Password is required"
        );
    }

    #[test]
    fn test_invalid_email() {
        for email in ["admin", "admin@", "admin@site", "admin@site.c", "a b@site.com"] {
            assert_eq!(validate_email(email), Err(EMAIL_INVALID), "{}", email);
        }
    }

    #[test]
    fn test_short_password() {
        let errors = LoginForm::new("admin@careoneclinics.com", "12345").validate().unwrap_err();
        assert!(errors.email.is_none());
        assert_eq!(errors.password.as_deref(), Some("Password must be at least 6 characters"));
    }
}
