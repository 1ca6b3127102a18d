pub mod accounts;
pub mod add_2fa_request;
pub mod add_other_credential_request;
pub mod change_email_password_request;
pub mod create_new_password_request;
pub mod forgot_password_request;
pub mod forgot_password_response;
pub mod login_request;
pub mod login_response;
pub mod message_response;
pub mod sign_up_request;
pub mod sign_up_response;
pub mod verify_credentials_request;
pub mod verify_credentials_response;
