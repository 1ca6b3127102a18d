pub mod bearer;
pub mod claims;
pub mod error;
pub mod password_hash;
pub mod token_service;
pub mod verified_subject;

pub use bearer::bearer_token;
pub use claims::Claims;
pub use error::{AuthError, Result};
pub use password_hash::{hash_password, verify_password};
pub use token_service::{TOKEN_TTL_HOURS, TokenService};
pub use verified_subject::VerifiedSubject;
