use crate::{CoreError, PasswordRule, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub const SPECIAL_CHARACTERS: &[char] = &[
    '!', '@', '#', '~', '$', '%', '^', '&', '*', '(', ')', '+', '|', '_',
];

/// First rule the password breaks, checked as length, letter, digit, special.
/// Length is measured in UTF-8 bytes.
pub fn first_violation(password: &str) -> Option<PasswordRule> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Some(PasswordRule::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Some(PasswordRule::MissingLetter);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Some(PasswordRule::MissingDigit);
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(&c)) {
        return Some(PasswordRule::MissingSpecial);
    }
    None
}

/// Check a candidate password against the policy
#[track_caller]
pub fn validate_password(password: &str) -> CoreErrorResult<()> {
    match first_violation(password) {
        Some(rule) => Err(CoreError::PolicyViolation {
            rule,
            location: ErrorLocation::from(Location::caller()),
        }),
        None => Ok(()),
    }
}
