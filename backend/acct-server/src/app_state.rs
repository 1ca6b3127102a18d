use crate::CredentialService;

use acct_auth::TokenService;
use acct_db::ProfileStore;
use acct_identity::IdentityProvider;

use std::sync::Arc;

/// Shared state handed to every handler and to the request gate
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialService>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        identity: Arc<dyn IdentityProvider>,
        tokens: Arc<TokenService>,
    ) -> Self {
        let credentials = CredentialService::new(store, identity, tokens.clone());
        Self {
            credentials: Arc::new(credentials),
            tokens,
        }
    }
}
