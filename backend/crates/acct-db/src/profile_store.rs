use crate::Result as DbErrorResult;

use acct_core::{ProfileUpdate, UserProfile};

use async_trait::async_trait;
/// Persistence for user profiles, keyed by subject id.
///
/// Writes are partial: `update` touches only the fields set on the
/// `ProfileUpdate` and reports whether a profile matched.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn create(&self, profile: &UserProfile) -> DbErrorResult<()>;

    async fn find_by_uid(&self, uid: &str) -> DbErrorResult<Option<UserProfile>>;

    async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<UserProfile>>;

    async fn find_by_phone(&self, phone_number: &str) -> DbErrorResult<Option<UserProfile>>;

    async fn update(&self, uid: &str, update: &ProfileUpdate) -> DbErrorResult<bool>;
}
