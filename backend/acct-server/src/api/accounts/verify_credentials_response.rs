use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct VerifyCredentialsResponse {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}
