pub mod credential_error;
pub mod credential_service;
