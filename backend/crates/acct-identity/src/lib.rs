pub mod error;
pub mod identity_provider;
pub mod models;
pub mod providers;

pub use error::{IdentityError, Result};
pub use identity_provider::IdentityProvider;
pub use models::identity_record::IdentityRecord;
pub use models::identity_update::IdentityUpdate;
pub use models::new_identity::NewIdentity;
pub use providers::firebase::FirebaseIdentityProvider;
pub use providers::in_memory::InMemoryIdentityProvider;
pub use providers::service_account::ServiceAccountKey;
