//! User profile - the document kept in the profile store for each account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile record keyed by the identity provider's subject id.
///
/// The `uid` never changes once assigned. A non-guest profile always carries
/// at least one of `email` / `phone_number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub is_email_verified: bool,
    pub is_phone_verified: bool,
    pub is_guest_user: bool,
    pub is_billable_user: bool,
    pub is_2f_needed: bool,
    /// Argon2 PHC string; `None` for guests
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

impl UserProfile {
    /// Profile for a credentialed signup. Contact and name fields start empty.
    pub fn registered(uid: String, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            password_hash: Some(password_hash),
            ..Self::blank(uid, now)
        }
    }

    /// Minimal profile for an anonymous identity
    pub fn guest(uid: String, now: DateTime<Utc>) -> Self {
        Self {
            is_guest_user: true,
            ..Self::blank(uid, now)
        }
    }

    /// Whether the profile carries an email or phone number
    pub fn has_contact(&self) -> bool {
        self.email.is_some() || self.phone_number.is_some()
    }

    fn blank(uid: String, now: DateTime<Utc>) -> Self {
        Self {
            uid,
            email: None,
            phone_number: None,
            is_email_verified: false,
            is_phone_verified: false,
            is_guest_user: false,
            is_billable_user: false,
            is_2f_needed: false,
            password_hash: None,
            first_name: None,
            last_name: None,
            country: None,
            address: None,
            created_at: now,
            last_login_at: now,
        }
    }
}
