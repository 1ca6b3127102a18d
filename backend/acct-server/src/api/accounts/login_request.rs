use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Phone number in +countrycode form, otherwise treated as an email
    pub email_or_phone: Option<String>,
    pub password: Option<String>,
}
