use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyCredentialsRequest {
    pub email_or_phone: Option<String>,
}
