/// An identity as the provider knows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    pub uid: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub email_verified: bool,
    pub disabled: bool,
}
