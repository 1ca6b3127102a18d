use crate::{IdentityRecord, IdentityUpdate, NewIdentity, Result as IdentityErrorResult};

use async_trait::async_trait;

/// External identity service: owns credentials and hands out subject ids.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an identity with the given credentials; returns its uid
    async fn create_user(&self, identity: &NewIdentity) -> IdentityErrorResult<String>;

    /// Create an identity with no credentials; returns its uid
    async fn create_anonymous_user(&self) -> IdentityErrorResult<String>;

    async fn get_user_by_email(&self, email: &str) -> IdentityErrorResult<Option<IdentityRecord>>;

    async fn update_user(&self, uid: &str, update: &IdentityUpdate) -> IdentityErrorResult<()>;

    /// Out-of-band link the account owner follows to choose a new password
    async fn password_reset_link(&self, email: &str) -> IdentityErrorResult<String>;
}
