pub mod api;
pub mod app_state;
pub mod credentials;
pub mod error;
pub mod health;
pub mod identity;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    accounts::{
        accounts::{
            add_2fa, add_other_credential, change_email_password, create_new_password,
            forgot_password, guest_login, login, sign_up, verify_credentials,
        },
        add_2fa_request::Add2faRequest,
        add_other_credential_request::AddOtherCredentialRequest,
        change_email_password_request::ChangeEmailPasswordRequest,
        create_new_password_request::CreateNewPasswordRequest,
        forgot_password_request::ForgotPasswordRequest,
        forgot_password_response::ForgotPasswordResponse,
        login_request::LoginRequest,
        login_response::LoginResponse,
        message_response::MessageResponse,
        sign_up_request::SignUpRequest,
        sign_up_response::SignUpResponse,
        verify_credentials_request::VerifyCredentialsRequest,
        verify_credentials_response::VerifyCredentialsResponse,
    },
    error::ApiError,
    error::Result as ApiResult,
    middleware::request_gate::request_gate,
};

pub use crate::app_state::AppState;
pub use crate::credentials::{
    credential_error::CredentialError,
    credential_service::{CredentialCheck, CredentialService, Session},
};
pub use crate::identity::build_identity_provider;
pub use crate::routes::build_router;
