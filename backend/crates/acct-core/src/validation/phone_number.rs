use crate::{CoreError, Result as CoreErrorResult};

use std::sync::LazyLock;

use regex::Regex;

pub const INVALID_PHONE_NUMBER_MESSAGE: &str =
    "invalid phone number format. should be in +countrycode format";

// `[0-9]` rather than `\d`: the regex crate's `\d` is Unicode-aware.
static PHONE_NUMBER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^\+[1-9][0-9]{1,14}$"));

/// E.164-shaped phone number: `+`, a non-zero digit, then 1-14 more digits
pub fn is_valid_phone_number(phone: &str) -> bool {
    PHONE_NUMBER
        .as_ref()
        .is_ok_and(|re| re.is_match(phone))
}

/// Reject a malformed phone number, naming the request `field` it came from
#[track_caller]
pub fn validate_phone_number(phone: &str, field: &str) -> CoreErrorResult<()> {
    if !is_valid_phone_number(phone) {
        return Err(CoreError::validation(INVALID_PHONE_NUMBER_MESSAGE, Some(field)));
    }
    Ok(())
}
