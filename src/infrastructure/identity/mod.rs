pub mod firebase;
pub mod memory;

use crate::domain::identity::IdentityProvider;
use crate::infrastructure::config::{AppConfig, IdentityBackend};
use std::sync::Arc;

pub use firebase::FirebaseIdentityProvider;
pub use memory::InMemoryIdentityProvider;

/// Build the configured identity backend
pub fn build_provider(config: &AppConfig) -> anyhow::Result<Arc<dyn IdentityProvider>> {
    match (config.identity_backend, &config.firebase) {
        (IdentityBackend::Firebase, Some(firebase)) => {
            tracing::info!(project_id = %firebase.project_id, "using Firebase identity backend");
            Ok(Arc::new(FirebaseIdentityProvider::new(firebase)))
        }
        (IdentityBackend::Firebase, None) => {
            Err(anyhow::anyhow!("Firebase backend selected without Firebase configuration"))
        }
        (IdentityBackend::Memory, _) => {
            tracing::warn!("using in-memory identity backend; accounts are not persisted");
            Ok(Arc::new(InMemoryIdentityProvider::new()))
        }
    }
}
