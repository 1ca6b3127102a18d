use chrono::{DateTime, Utc};

/// Partial profile update. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub is_email_verified: Option<bool>,
    pub is_phone_verified: Option<bool>,
    pub is_2f_needed: Option<bool>,
    pub password_hash: Option<String>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.phone_number.is_none()
            && self.is_email_verified.is_none()
            && self.is_phone_verified.is_none()
            && self.is_2f_needed.is_none()
            && self.password_hash.is_none()
            && self.last_login_at.is_none()
    }
}
