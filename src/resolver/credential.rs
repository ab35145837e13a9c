//! Credential resolution with optional credential-store lookup.

use std::sync::Arc;

use crate::config::ConfigParams;
use crate::connection::CredentialParams;
use crate::error::{ConfigError, Error, ErrorCode, Result};
use crate::lookup::CredentialStore;

/// Holds configured credentials and resolves them, through a credential
/// store when a credential carries a `store_key`.
#[derive(Clone, Default)]
pub struct CredentialResolver {
    credentials: Vec<CredentialParams>,
    stores: Vec<Arc<dyn CredentialStore>>,
}

impl CredentialResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver that consults `stores` in order.
    pub fn with_stores(stores: Vec<Arc<dyn CredentialStore>>) -> Self {
        Self {
            credentials: Vec::new(),
            stores,
        }
    }

    /// Append credentials found in `config`.
    pub fn configure(&mut self, config: &ConfigParams) {
        self.credentials
            .extend(CredentialParams::many_from_config(config));
    }

    pub fn add(&mut self, credential: CredentialParams) {
        self.credentials.push(credential);
    }

    pub fn credentials(&self) -> &[CredentialParams] {
        &self.credentials
    }

    /// Look up a single credential.
    pub async fn lookup(&self, correlation_id: Option<&str>) -> Result<Option<CredentialParams>> {
        if let Some(plain) = self.credentials.iter().find(|c| !c.use_credential_store()) {
            return Ok(Some(plain.clone()));
        }

        for credential in &self.credentials {
            let Some(key) = credential.store_key() else {
                continue;
            };
            if let Some(found) = self.lookup_in_stores(correlation_id, key).await? {
                tracing::debug!(
                    correlation_id = correlation_id.unwrap_or_default(),
                    store_key = key,
                    "Credential resolved via store"
                );
                return Ok(Some(found));
            }
        }

        Ok(None)
    }

    async fn lookup_in_stores(
        &self,
        correlation_id: Option<&str>,
        key: &str,
    ) -> Result<Option<CredentialParams>> {
        if self.stores.is_empty() {
            return Err(ConfigError::new(
                correlation_id,
                ErrorCode::NoCredentialStore,
                "Credential store wasn't found to make lookup",
            )
            .with_details("store_key", key)
            .into());
        }

        for store in &self.stores {
            let found = store
                .lookup(correlation_id, key)
                .await
                .map_err(|e| Error::lookup(correlation_id, key, e))?;
            if found.is_some() {
                return Ok(found);
            }
        }

        Ok(None)
    }
}

impl std::fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialResolver")
            .field("credentials", &self.credentials)
            .field("stores", &self.stores.len())
            .finish()
    }
}
