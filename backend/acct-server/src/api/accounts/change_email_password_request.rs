use serde::Deserialize;

/// At least one of the two fields must be present
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChangeEmailPasswordRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}
