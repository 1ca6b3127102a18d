pub mod email_address;
pub mod password_policy;
pub mod phone_number;
