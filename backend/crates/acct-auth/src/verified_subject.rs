use crate::{Result as AuthErrorResult, TokenService, bearer_token};

/// Subject id proven by a verified bearer token.
///
/// The request gate places this in the request extensions; handlers read it
/// from there instead of verifying the token again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSubject(pub String);

impl VerifiedSubject {
    /// Parse and verify an `Authorization` header value
    #[track_caller]
    pub fn from_authorization(
        header: Option<&str>,
        tokens: &TokenService,
    ) -> AuthErrorResult<Self> {
        let token = bearer_token(header)?;
        let uid = tokens.verify(token)?;
        Ok(Self(uid))
    }

    pub fn uid(&self) -> &str {
        &self.0
    }
}
