use serde::Serialize;

/// Returned by both login and guest login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub uid: String,
    pub token: String,
}
