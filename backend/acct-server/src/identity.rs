use crate::error::Result as ServerErrorResult;

use acct_config::{IdentityConfig, IdentityProviderKind};
use acct_identity::{
    FirebaseIdentityProvider, IdentityProvider, InMemoryIdentityProvider, ServiceAccountKey,
};

use std::path::Path;
use std::sync::Arc;

use log::{info, warn};

/// Construct the identity provider selected by configuration.
///
/// Config validation has already checked that the emulator has a project id
/// and that the credentials file is set for the hosted provider.
pub fn build_identity_provider(
    config: &IdentityConfig,
) -> ServerErrorResult<Arc<dyn IdentityProvider>> {
    match config.provider {
        IdentityProviderKind::Memory => {
            warn!("Identity provider: in-memory (identities are lost on restart)");
            Ok(Arc::new(InMemoryIdentityProvider::new()))
        }
        IdentityProviderKind::Firebase => {
            if let Some(ref host) = config.emulator_host {
                let project_id = config.project_id.as_deref().unwrap_or_default();
                info!("Identity provider: Firebase emulator at {}", host);
                return Ok(Arc::new(FirebaseIdentityProvider::for_emulator(
                    host, project_id,
                )));
            }

            let path = config.credentials_file.as_deref().unwrap_or_default();
            let key = ServiceAccountKey::from_file(Path::new(path))?;
            let provider = FirebaseIdentityProvider::with_service_account(
                key,
                &config.api_base_url,
                config.project_id.as_deref(),
            );
            info!("Identity provider: Firebase project {}", provider.project_id());
            Ok(Arc::new(provider))
        }
    }
}
