//! Account sign-up payload and validation.
//!
//! Every rule here runs before any call leaves the process: a payload that
//! fails validation must never reach the identity service.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Phone numbers are plain digit strings; no separators, no leading `+`.
static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));

/// A new-account request as submitted by the sign-up form. An empty phone
/// string means the field was left blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub username: String,
    pub phone: Option<String>,
}

/// Validate an email address. The rule is deliberately shallow: the
/// identity service is the authority on deliverability, this only catches
/// entries that cannot possibly be addresses.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.contains('@') {
        return Err(CoreError::Validation(
            "Please enter a valid email address.".to_string(),
        ));
    }
    Ok(())
}

/// Validate a phone number, if one was provided.
pub fn validate_phone(phone: Option<&str>) -> Result<(), CoreError> {
    match phone {
        None | Some("") => Ok(()),
        Some(p) if DIGITS_RE.is_match(p) => Ok(()),
        Some(_) => Err(CoreError::Validation(
            "Phone number must contain only digits.".to_string(),
        )),
    }
}

/// Validate the display name.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.is_empty() {
        return Err(CoreError::Validation(
            "Username must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate that a password meets the minimum length.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Run the full sign-up rule set, failing on the first violation.
pub fn validate_new_account(account: &NewAccount) -> Result<(), CoreError> {
    validate_email(&account.email)?;
    validate_phone(account.phone.as_deref())?;
    validate_username(&account.username)?;
    validate_password(&account.password)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
