//! Identity Toolkit REST client.
//!
//! Talks to `/v1/projects/{project}/accounts*` either on Google's endpoint,
//! authenticated with a service-account access token, or on the local Auth
//! emulator, which accepts the fixed bearer `owner`.

use crate::{
    IdentityError, IdentityProvider, IdentityRecord, IdentityUpdate, NewIdentity,
    Result as IdentityErrorResult, ServiceAccountKey,
};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, info};
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

const EMULATOR_BEARER: &str = "owner";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
/// Refresh this long before the provider-reported expiry
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

enum ProviderAuth {
    Emulator,
    ServiceAccount {
        key: ServiceAccountKey,
        cached: Mutex<Option<AccessToken>>,
    },
}

struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

pub struct FirebaseIdentityProvider {
    client: ReqwestClient,
    base_url: String,
    project_id: String,
    auth: ProviderAuth,
}

// ---- wire types --------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccountRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateAccountRequest<'a> {
    local_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email_verified: Option<bool>,
}

#[derive(Serialize)]
struct LookupRequest<'a> {
    email: [&'a str; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeRequest<'a> {
    request_type: &'a str,
    email: &'a str,
    return_oob_link: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<UserInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserInfo {
    local_id: String,
    email: Option<String>,
    phone_number: Option<String>,
    #[serde(default)]
    email_verified: bool,
    #[serde(default)]
    disabled: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeResponse {
    oob_link: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

impl From<UserInfo> for IdentityRecord {
    fn from(user: UserInfo) -> Self {
        Self {
            uid: user.local_id,
            email: user.email,
            phone_number: user.phone_number,
            email_verified: user.email_verified,
            disabled: user.disabled,
        }
    }
}

// ---- client ------------------------------------------------------------

impl FirebaseIdentityProvider {
    /// Production client authenticated with a service account.
    /// `project_id` overrides the project named in the key.
    pub fn with_service_account(
        key: ServiceAccountKey,
        api_base_url: &str,
        project_id: Option<&str>,
    ) -> Self {
        let project_id = project_id
            .map(String::from)
            .unwrap_or_else(|| key.project_id.clone());

        Self {
            client: ReqwestClient::new(),
            base_url: api_base_url.trim_end_matches('/').to_string(),
            project_id,
            auth: ProviderAuth::ServiceAccount {
                key,
                cached: Mutex::new(None),
            },
        }
    }

    /// Client for the Auth emulator at `host` (e.g. "localhost:9099")
    pub fn for_emulator(host: &str, project_id: &str) -> Self {
        let host = host.trim_end_matches('/');
        let base = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        };

        Self {
            client: ReqwestClient::new(),
            base_url: format!("{}/identitytoolkit.googleapis.com", base),
            project_id: project_id.to_string(),
            auth: ProviderAuth::Emulator,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn accounts_url(&self, action: &str) -> String {
        format!(
            "{}/v1/projects/{}/accounts{}",
            self.base_url, self.project_id, action
        )
    }

    async fn bearer(&self) -> IdentityErrorResult<String> {
        match &self.auth {
            ProviderAuth::Emulator => Ok(EMULATOR_BEARER.to_string()),
            ProviderAuth::ServiceAccount { key, cached } => {
                let mut cached = cached.lock().await;
                let now = Utc::now();

                if let Some(token) = cached.as_ref()
                    && token.expires_at > now
                {
                    return Ok(token.value.clone());
                }

                let token = self.fetch_access_token(key, now).await?;
                let value = token.value.clone();
                *cached = Some(token);
                Ok(value)
            }
        }
    }

    async fn fetch_access_token(
        &self,
        key: &ServiceAccountKey,
        now: DateTime<Utc>,
    ) -> IdentityErrorResult<AccessToken> {
        let assertion = key.assertion(now)?;
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", JWT_BEARER_GRANT)
            .append_pair("assertion", &assertion)
            .finish();

        debug!("Requesting access token from {}", key.token_uri);

        let response = self
            .client
            .post(&key.token_uri)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(IdentityError::access_token(format!(
                "token endpoint returned {}: {}",
                status, text
            )));
        }

        let token: TokenResponse = response.json().await?;
        info!("Obtained identity provider access token");

        Ok(AccessToken {
            value: token.access_token,
            expires_at: now + TimeDelta::seconds(token.expires_in - TOKEN_REFRESH_MARGIN_SECS),
        })
    }

    /// POST a JSON body and decode the response, mapping provider error bodies
    async fn post<B, R>(&self, action: &str, body: &B) -> IdentityErrorResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let bearer = self.bearer().await?;
        let response = self
            .client
            .post(self.accounts_url(action))
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or("UNKNOWN")
                .to_string();
            return Err(IdentityError::provider(status.as_u16(), message));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn create_user(&self, identity: &NewIdentity) -> IdentityErrorResult<String> {
        let request = CreateAccountRequest {
            email: identity.email.as_deref(),
            phone_number: identity.phone_number.as_deref(),
            password: identity.password.as_deref(),
        };

        let created: AccountResponse = self.post("", &request).await?;
        debug!("Created identity {}", created.local_id);
        Ok(created.local_id)
    }

    async fn create_anonymous_user(&self) -> IdentityErrorResult<String> {
        let request = CreateAccountRequest {
            email: None,
            phone_number: None,
            password: None,
        };

        let created: AccountResponse = self.post("", &request).await?;
        debug!("Created anonymous identity {}", created.local_id);
        Ok(created.local_id)
    }

    async fn get_user_by_email(&self, email: &str) -> IdentityErrorResult<Option<IdentityRecord>> {
        let request = LookupRequest { email: [email] };

        let found: LookupResponse = self.post(":lookup", &request).await?;
        Ok(found.users.into_iter().next().map(IdentityRecord::from))
    }

    async fn update_user(&self, uid: &str, update: &IdentityUpdate) -> IdentityErrorResult<()> {
        let request = UpdateAccountRequest {
            local_id: uid,
            email: update.email.as_deref(),
            phone_number: update.phone_number.as_deref(),
            password: update.password.as_deref(),
            email_verified: update.email_verified,
        };

        let _: AccountResponse = self.post(":update", &request).await?;
        Ok(())
    }

    async fn password_reset_link(&self, email: &str) -> IdentityErrorResult<String> {
        let request = OobCodeRequest {
            request_type: "PASSWORD_RESET",
            email,
            return_oob_link: true,
        };

        let response: OobCodeResponse = self.post(":sendOobCode", &request).await?;
        Ok(response.oob_link)
    }
}
