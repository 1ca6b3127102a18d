#![allow(dead_code)]

use acct_identity::ServiceAccountKey;

pub const PROJECT_ID: &str = "demo-accounts";
pub const CLIENT_EMAIL: &str = "svc@demo-accounts.iam.gserviceaccount.com";

pub const PRIVATE_KEY_PEM: &str = include_str!("../fixtures/test_service_account_key.pem");
pub const PUBLIC_KEY_PEM: &str = include_str!("../fixtures/test_service_account_key.pub.pem");

/// Service-account key whose token endpoint lives on the mock server
pub fn test_service_account(mock_uri: &str) -> ServiceAccountKey {
    ServiceAccountKey {
        project_id: PROJECT_ID.to_string(),
        client_email: CLIENT_EMAIL.to_string(),
        private_key: PRIVATE_KEY_PEM.to_string(),
        token_uri: format!("{}/token", mock_uri),
    }
}

pub fn accounts_path(action: &str) -> String {
    format!("/v1/projects/{}/accounts{}", PROJECT_ID, action)
}
