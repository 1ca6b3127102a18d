use crate::{
    IdentityError, IdentityProvider, IdentityRecord, IdentityUpdate, NewIdentity,
    Result as IdentityErrorResult,
};

use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use tokio::sync::Mutex;
use url::Url;
use uuid::Uuid;

const RESET_LINK_BASE: &str = "http://localhost/__/auth/action";

struct StoredIdentity {
    record: IdentityRecord,
    password: Option<String>,
}

/// Process-local identity provider.
///
/// Enforces the same uniqueness rules as the hosted provider (one identity per
/// email and per phone number) and answers with the same reason codes.
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    identities: Mutex<HashMap<String, StoredIdentity>>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `password` is the current password of `uid`
    pub async fn check_password(&self, uid: &str, password: &str) -> bool {
        let identities = self.identities.lock().await;
        identities
            .get(uid)
            .and_then(|stored| stored.password.as_deref())
            .is_some_and(|stored| stored == password)
    }

    pub async fn len(&self) -> usize {
        self.identities.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.identities.lock().await.is_empty()
    }
}

fn ensure_unique(
    identities: &HashMap<String, StoredIdentity>,
    except_uid: Option<&str>,
    email: Option<&str>,
    phone_number: Option<&str>,
) -> IdentityErrorResult<()> {
    let others = identities
        .values()
        .filter(|stored| Some(stored.record.uid.as_str()) != except_uid);

    for stored in others {
        if email.is_some() && stored.record.email.as_deref() == email {
            return Err(IdentityError::provider(400, "EMAIL_EXISTS"));
        }
        if phone_number.is_some() && stored.record.phone_number.as_deref() == phone_number {
            return Err(IdentityError::provider(400, "PHONE_NUMBER_EXISTS"));
        }
    }

    Ok(())
}

fn new_uid() -> String {
    Uuid::new_v4().simple().to_string()
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn create_user(&self, identity: &NewIdentity) -> IdentityErrorResult<String> {
        let mut identities = self.identities.lock().await;

        ensure_unique(
            &identities,
            None,
            identity.email.as_deref(),
            identity.phone_number.as_deref(),
        )?;

        let uid = new_uid();
        identities.insert(
            uid.clone(),
            StoredIdentity {
                record: IdentityRecord {
                    uid: uid.clone(),
                    email: identity.email.clone(),
                    phone_number: identity.phone_number.clone(),
                    email_verified: false,
                    disabled: false,
                },
                password: identity.password.clone(),
            },
        );

        debug!("Created in-memory identity {}", uid);
        Ok(uid)
    }

    async fn create_anonymous_user(&self) -> IdentityErrorResult<String> {
        self.create_user(&NewIdentity::default()).await
    }

    async fn get_user_by_email(&self, email: &str) -> IdentityErrorResult<Option<IdentityRecord>> {
        let identities = self.identities.lock().await;

        Ok(identities
            .values()
            .find(|stored| stored.record.email.as_deref() == Some(email))
            .map(|stored| stored.record.clone()))
    }

    async fn update_user(&self, uid: &str, update: &IdentityUpdate) -> IdentityErrorResult<()> {
        let mut identities = self.identities.lock().await;

        ensure_unique(
            &identities,
            Some(uid),
            update.email.as_deref(),
            update.phone_number.as_deref(),
        )?;

        let stored = identities
            .get_mut(uid)
            .ok_or_else(|| IdentityError::provider(400, "USER_NOT_FOUND"))?;

        if let Some(email) = &update.email {
            stored.record.email = Some(email.clone());
        }
        if let Some(phone_number) = &update.phone_number {
            stored.record.phone_number = Some(phone_number.clone());
        }
        if let Some(password) = &update.password {
            stored.password = Some(password.clone());
        }
        if let Some(email_verified) = update.email_verified {
            stored.record.email_verified = email_verified;
        }

        Ok(())
    }

    async fn password_reset_link(&self, email: &str) -> IdentityErrorResult<String> {
        if self.get_user_by_email(email).await?.is_none() {
            return Err(IdentityError::provider(400, "EMAIL_NOT_FOUND"));
        }

        let oob_code = new_uid();
        let link = Url::parse_with_params(
            RESET_LINK_BASE,
            &[
                ("mode", "resetPassword"),
                ("oobCode", oob_code.as_str()),
                ("email", email),
            ],
        )
        .map_err(|e| IdentityError::provider(500, e.to_string()))?;

        Ok(link.into())
    }
}
