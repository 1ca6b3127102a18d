use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub message: String,
    pub uid: String,
}
