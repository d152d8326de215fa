use crate::domain::profiles::is_known_location;
use crate::shared::error::AppError;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::sync::LazyLock;
use time::{Date, macros::format_description};
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::ValidationError(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::ValidationError(format_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Flatten validator errors into `field: message; field: message`, sorted by
/// field name so responses are stable.
pub fn format_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{5,18}[0-9]$").expect("valid phone regex"));

pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

pub const PASSWORD_RULES_MESSAGE: &str = "Password must be at least 8 characters and include uppercase, lowercase, number, and special character";

/// Basic two-part `local@domain.tld` check
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

/// At least 8 characters with one lowercase, one uppercase, one digit and one
/// symbol from [`PASSWORD_SYMBOLS`]. Line terminators are never accepted.
pub fn is_strong_password(password: &str) -> bool {
    if password
        .chars()
        .any(|c| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}'))
    {
        return false;
    }

    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Rejects empty and whitespace-only text
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(rule_error("blank", "Must not be blank"))
    } else {
        Ok(())
    }
}

pub fn validate_email_format(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(rule_error("email", "Invalid email format"))
    }
}

pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if is_strong_password(password) {
        Ok(())
    } else {
        Err(rule_error("password_strength", PASSWORD_RULES_MESSAGE))
    }
}

pub fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(rule_error("phone", "Invalid phone number"))
    }
}

/// `YYYY-MM-DD` calendar date
pub fn validate_date_of_birth(dob: &str) -> Result<(), ValidationError> {
    parse_date(dob)
        .map(|_| ())
        .ok_or_else(|| rule_error("date", "Date of birth must be a valid YYYY-MM-DD date"))
}

pub fn validate_location(location: &str) -> Result<(), ValidationError> {
    if is_known_location(location) {
        Ok(())
    } else {
        Err(rule_error("location", "Unknown location"))
    }
}

pub fn validate_terms_accepted(agreed: &bool) -> Result<(), ValidationError> {
    if *agreed {
        Ok(())
    } else {
        Err(rule_error(
            "terms",
            "You must agree to the terms and privacy policy.",
        ))
    }
}

/// Strict `YYYY-MM-DD`; signed years are refused
pub fn parse_date(value: &str) -> Option<Date> {
    if value.len() != 10 || !value.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Date::parse(value, format_description!("[year]-[month]-[day]")).ok()
}
