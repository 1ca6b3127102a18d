use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddOtherCredentialRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
}
