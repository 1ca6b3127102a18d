/// Fields to change on an existing identity; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct IdentityUpdate {
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
    pub email_verified: Option<bool>,
}

impl IdentityUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.phone_number.is_none()
            && self.password.is_none()
            && self.email_verified.is_none()
    }
}
