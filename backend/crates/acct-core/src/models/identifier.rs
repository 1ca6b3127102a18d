//! Login identifier classification.

use crate::is_valid_phone_number;

/// A user-supplied "email or phone" value, classified by shape.
///
/// Anything that passes the phone number check is treated as a phone number;
/// everything else is looked up as an email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Email(String),
    Phone(String),
}

impl Identifier {
    pub fn classify(raw: &str) -> Self {
        if is_valid_phone_number(raw) {
            Identifier::Phone(raw.to_string())
        } else {
            Identifier::Email(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Identifier::Email(value) | Identifier::Phone(value) => value,
        }
    }

    pub fn is_phone(&self) -> bool {
        matches!(self, Identifier::Phone(_))
    }
}
