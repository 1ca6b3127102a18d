use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateNewPasswordRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}
