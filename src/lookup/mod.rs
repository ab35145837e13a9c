//! Lookup capabilities consumed by the resolvers.
//!
//! # Data Flow
//! ```text
//! ConnectionResolver ──discovery_key──▶ dyn Discovery
//!                                        (resolve_one / resolve_all / register)
//! CredentialResolver ──store_key──────▶ dyn CredentialStore (lookup)
//! ```
//!
//! # Design Decisions
//! - Capabilities are injected at construction as `Arc<dyn _>`
//! - Implementations live outside this crate
//! - Failures are opaque boxed errors; resolvers attach correlation id and key

use async_trait::async_trait;

use crate::connection::{ConnectionParams, CredentialParams};
use crate::error::BoxError;

/// Maps a symbolic key to concrete connection parameters.
#[async_trait]
pub trait Discovery: Send + Sync {
    /// Register connection parameters under `key`.
    async fn register(
        &self,
        correlation_id: Option<&str>,
        key: &str,
        connection: &ConnectionParams,
    ) -> Result<(), BoxError>;

    /// Resolve a single connection registered under `key`.
    async fn resolve_one(
        &self,
        correlation_id: Option<&str>,
        key: &str,
    ) -> Result<Option<ConnectionParams>, BoxError>;

    /// Resolve every connection registered under `key`.
    async fn resolve_all(
        &self,
        correlation_id: Option<&str>,
        key: &str,
    ) -> Result<Vec<ConnectionParams>, BoxError>;
}

/// Maps a symbolic key to credential parameters.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Store credential parameters under `key`.
    async fn store(
        &self,
        correlation_id: Option<&str>,
        key: &str,
        credential: &CredentialParams,
    ) -> Result<(), BoxError>;

    /// Look up the credential stored under `key`.
    async fn lookup(
        &self,
        correlation_id: Option<&str>,
        key: &str,
    ) -> Result<Option<CredentialParams>, BoxError>;
}
