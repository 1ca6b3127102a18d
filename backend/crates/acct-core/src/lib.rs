pub mod error;
pub mod models;
pub mod validation;

pub use error::{CoreError, Result};
pub use models::identifier::Identifier;
pub use models::password_rule::PasswordRule;
pub use models::profile_update::ProfileUpdate;
pub use models::user_profile::UserProfile;
pub use validation::email_address::{INVALID_EMAIL_MESSAGE, is_valid_email, validate_email};
pub use validation::password_policy::{
    MIN_PASSWORD_LENGTH, SPECIAL_CHARACTERS, first_violation, validate_password,
};
pub use validation::phone_number::{
    INVALID_PHONE_NUMBER_MESSAGE, is_valid_phone_number, validate_phone_number,
};
