use serde::Deserialize;

/// All fields are optional on the wire; missing values are reported by the
/// credential flows as validation errors.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignUpRequest {
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
}
