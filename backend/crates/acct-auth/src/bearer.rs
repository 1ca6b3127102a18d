use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Extract the token from an `Authorization` header value.
///
/// The value must be exactly two space-separated parts, the first being
/// `Bearer`. A missing or empty header is reported separately from a
/// malformed one.
#[track_caller]
pub fn bearer_token(header: Option<&str>) -> AuthErrorResult<&str> {
    let value = match header {
        Some(value) if !value.is_empty() => value,
        _ => {
            return Err(AuthError::MissingHeader {
                location: ErrorLocation::from(Location::caller()),
            });
        }
    };

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] => Ok(*token),
        _ => Err(AuthError::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}
