use crate::{CoreError, Result as CoreErrorResult};

use std::sync::LazyLock;

use regex::Regex;

pub const INVALID_EMAIL_MESSAGE: &str = "invalid email address format";

static EMAIL_ADDRESS: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$"));

/// Syntactic address check only; deliverability is the provider's concern
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_ADDRESS
        .as_ref()
        .is_ok_and(|re| re.is_match(email))
}

#[track_caller]
pub fn validate_email(email: &str, field: &str) -> CoreErrorResult<()> {
    if !is_valid_email(email) {
        return Err(CoreError::validation(INVALID_EMAIL_MESSAGE, Some(field)));
    }
    Ok(())
}
