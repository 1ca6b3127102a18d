/// Credentials for a new identity. All fields empty = anonymous identity.
#[derive(Debug, Clone, Default)]
pub struct NewIdentity {
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
}
