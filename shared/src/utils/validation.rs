//! Common validation utilities
//!
//! Registration password policy: at least [`MIN_PASSWORD_LENGTH`] characters
//! drawn only from letters, digits and [`PASSWORD_SPECIAL_CHARS`], with at
//! least one uppercase letter, one lowercase letter, one digit and one
//! special character.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum password length for login and registration
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum length of first and last names
pub const MAX_NAME_LENGTH: usize = 50;

/// Special characters accepted (and one required) in passwords
pub const PASSWORD_SPECIAL_CHARS: &str = "@$!%*?&";

static PASSWORD_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9@$!%*?&]+$").expect("password charset regex is valid")
});

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// Reasons a password fails the registration policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordIssue {
    TooShort,
    InvalidCharacter,
    MissingUppercase,
    MissingLowercase,
    MissingDigit,
    MissingSpecial,
}

impl PasswordIssue {
    pub fn message(&self) -> &'static str {
        match self {
            PasswordIssue::TooShort => "Password must be at least 6 characters",
            PasswordIssue::InvalidCharacter => {
                "Password may only contain letters, digits and @$!%*?&"
            }
            PasswordIssue::MissingUppercase
            | PasswordIssue::MissingLowercase
            | PasswordIssue::MissingDigit
            | PasswordIssue::MissingSpecial => {
                "Password must contain at least one uppercase letter, one lowercase letter, one number and one special character"
            }
        }
    }
}

/// Check a password against the registration policy
///
/// Returns the first rule the password breaks.
pub fn check_password_strength(password: &str) -> Result<(), PasswordIssue> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordIssue::TooShort);
    }
    if !PASSWORD_CHARSET.is_match(password) {
        return Err(PasswordIssue::InvalidCharacter);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordIssue::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordIssue::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordIssue::MissingDigit);
    }
    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        return Err(PasswordIssue::MissingSpecial);
    }
    Ok(())
}

/// Hide the local part of an email before it reaches the logs
///
/// `bob@example.com` becomes `b***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}

/// Common validation functions
pub mod validators {
    use super::EMAIL_PATTERN;

    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string length (in characters) is within bounds
    pub fn length_between(value: &str, min: usize, max: usize) -> bool {
        let len = value.chars().count();
        len >= min && len <= max
    }

    /// Check if an email address is syntactically valid
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_PATTERN.is_match(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_password_accepted() {
        assert_eq!(check_password_strength("Passw0rd!"), Ok(()));
        assert_eq!(check_password_strength("aB3$zz"), Ok(()));
    }

    #[test]
    fn test_password_rules() {
        assert_eq!(check_password_strength("aB3$"), Err(PasswordIssue::TooShort));
        assert_eq!(check_password_strength("Passw0rd#"), Err(PasswordIssue::InvalidCharacter));
        assert_eq!(check_password_strength("Pass w0rd!"), Err(PasswordIssue::InvalidCharacter));
        assert_eq!(check_password_strength("passw0rd!"), Err(PasswordIssue::MissingUppercase));
        assert_eq!(check_password_strength("PASSW0RD!"), Err(PasswordIssue::MissingLowercase));
        assert_eq!(check_password_strength("Password!"), Err(PasswordIssue::MissingDigit));
        assert_eq!(check_password_strength("Passw0rd"), Err(PasswordIssue::MissingSpecial));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("bob@example.com"), "b***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_validators() {
        assert!(validators::is_valid_email("bob@example.com"));
        assert!(!validators::is_valid_email("bob@example"));
        assert!(!validators::is_valid_email("bob example.com"));
        assert!(validators::length_between("Bob", 1, 50));
        assert!(!validators::length_between(&"x".repeat(51), 1, 50));
        assert!(!validators::not_empty("   "));
    }
}
