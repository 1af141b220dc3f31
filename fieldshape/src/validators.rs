//! Field validators
//!
//! A validator inspects one field value and either accepts it or returns a
//! human-readable reason. Plain functions and closures with the signature
//! `Fn(&Value) -> Result<(), String>` are validators, so the built-ins below
//! are free functions that can be dropped straight into a validation chain.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Minimum password length accepted by [`valid_password`]
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters that satisfy the special-character rule of [`valid_password`]
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*()-_=+[]{}|;:'\",.<>/?`~\\";

// local@domain.tld with a dotted domain and an alphabetic TLD of 2+ letters.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("EMAIL_REGEX: invalid regex pattern")
});

/// Single-method validation capability
pub trait FieldValidator: Send + Sync {
    /// Accept the value or explain why it is rejected
    fn validate(&self, value: &Value) -> Result<(), String>;
}

impl<F> FieldValidator for F
where
    F: Fn(&Value) -> Result<(), String> + Send + Sync,
{
    fn validate(&self, value: &Value) -> Result<(), String> {
        self(value)
    }
}

/// String field with a maximum length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringField {
    /// Maximum length in characters
    pub max_length: usize,
}

impl FieldValidator for StringField {
    fn validate(&self, value: &Value) -> Result<(), String> {
        let Value::String(s) = value else {
            return Err("not a valid string".to_string());
        };
        if s.chars().count() > self.max_length {
            return Err("string exceeds max length".to_string());
        }
        Ok(())
    }
}

/// Validator rejecting strings longer than `max_length` characters
pub fn max_length(max_length: usize) -> StringField {
    StringField { max_length }
}

/// Value must be a non-empty string
pub fn not_empty(value: &Value) -> Result<(), String> {
    match value {
        Value::String(s) if s.is_empty() => Err("value cannot be empty".to_string()),
        Value::String(_) => Ok(()),
        _ => Err("value is not a string".to_string()),
    }
}

/// Value must be a number greater than zero
pub fn positive(value: &Value) -> Result<(), String> {
    let Some(num) = value.as_f64() else {
        return Err("value is not a number".to_string());
    };
    if num <= 0.0 {
        return Err("value must be positive".to_string());
    }
    Ok(())
}

/// Value must be a strong password
///
/// Checked in order: string type, length, uppercase, lowercase, digit,
/// special character. The message names the first rule the value breaks.
pub fn valid_password(value: &Value) -> Result<(), String> {
    let Value::String(password) = value else {
        return Err("value is not a string".to_string());
    };

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        ));
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err("password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return Err("password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("password must contain at least one digit".to_string());
    }
    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        return Err("password must contain at least one special character".to_string());
    }
    Ok(())
}

/// Value must be a string shaped like an email address
pub fn valid_email(value: &Value) -> Result<(), String> {
    let Value::String(email) = value else {
        return Err("value is not a string".to_string());
    };
    if !EMAIL_REGEX.is_match(email) {
        return Err("invalid email format".to_string());
    }
    Ok(())
}
