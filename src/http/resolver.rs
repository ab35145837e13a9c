//! HTTP connection resolution.
//!
//! # Responsibilities
//! - Resolve connection and credential through their resolvers
//! - Validate the pair, then normalize the connection
//! - Register a validated connection back to discovery

use std::sync::Arc;

use tracing::Instrument;

use crate::config::ConfigParams;
use crate::connection::ConnectionParams;
use crate::error::Result;
use crate::http::validator::{missing_connection, normalize_connection, validate_connection};
use crate::lookup::{CredentialStore, Discovery};
use crate::observability::{metrics, spans};
use crate::resolver::{ConnectionResolver, CredentialResolver};

/// Resolves canonical HTTP connections.
///
/// Every operation is fail-fast: the first invalid connection aborts the
/// call and nothing partial is returned.
#[derive(Debug, Clone, Default)]
pub struct HttpConnectionResolver {
    connection_resolver: ConnectionResolver,
    credential_resolver: CredentialResolver,
}

impl HttpConnectionResolver {
    /// Create a resolver with no lookup capabilities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver backed by the given discoveries and credential stores.
    pub fn with_lookups(
        discoveries: Vec<Arc<dyn Discovery>>,
        stores: Vec<Arc<dyn CredentialStore>>,
    ) -> Self {
        Self {
            connection_resolver: ConnectionResolver::with_discoveries(discoveries),
            credential_resolver: CredentialResolver::with_stores(stores),
        }
    }

    /// Feed `config` to both resolvers.
    pub fn configure(&mut self, config: &ConfigParams) {
        self.connection_resolver.configure(config);
        self.credential_resolver.configure(config);
    }

    /// Resolve, validate and normalize a single connection.
    pub async fn resolve(&self, correlation_id: Option<&str>) -> Result<ConnectionParams> {
        let result = self
            .resolve_one(correlation_id)
            .instrument(spans::resolution_span("resolve", correlation_id))
            .await;
        metrics::record_resolution("resolve", result.is_ok());
        result
    }

    /// Resolve, validate and normalize every configured connection.
    pub async fn resolve_all(&self, correlation_id: Option<&str>) -> Result<Vec<ConnectionParams>> {
        let result = self
            .resolve_many(correlation_id)
            .instrument(spans::resolution_span("resolve_all", correlation_id))
            .await;
        metrics::record_resolution("resolve_all", result.is_ok());
        result
    }

    /// Validate the resolved connection and register it with discovery.
    ///
    /// The connection is registered as resolved, without normalization.
    pub async fn register(&self, correlation_id: Option<&str>) -> Result<()> {
        let result = self
            .register_one(correlation_id)
            .instrument(spans::resolution_span("register", correlation_id))
            .await;
        metrics::record_resolution("register", result.is_ok());
        result
    }

    async fn resolve_one(&self, correlation_id: Option<&str>) -> Result<ConnectionParams> {
        let connection = self.connection_resolver.resolve(correlation_id).await?;
        let credential = self.credential_resolver.lookup(correlation_id).await?;

        let mut connection = connection.ok_or_else(|| missing_connection(correlation_id))?;
        validate_connection(correlation_id, Some(&connection), credential.as_ref())?;
        normalize_connection(correlation_id, &mut connection, credential.as_ref())?;

        tracing::debug!(uri = connection.uri().unwrap_or_default(), "Connection resolved");
        Ok(connection)
    }

    async fn resolve_many(&self, correlation_id: Option<&str>) -> Result<Vec<ConnectionParams>> {
        let mut connections = self.connection_resolver.resolve_all(correlation_id).await?;
        let credential = self.credential_resolver.lookup(correlation_id).await?;

        for connection in connections.iter_mut() {
            validate_connection(correlation_id, Some(&*connection), credential.as_ref())?;
            normalize_connection(correlation_id, connection, credential.as_ref())?;
        }

        tracing::debug!(count = connections.len(), "Connections resolved");
        Ok(connections)
    }

    async fn register_one(&self, correlation_id: Option<&str>) -> Result<()> {
        let connection = self.connection_resolver.resolve(correlation_id).await?;
        let credential = self.credential_resolver.lookup(correlation_id).await?;

        let connection = connection.ok_or_else(|| missing_connection(correlation_id))?;
        validate_connection(correlation_id, Some(&connection), credential.as_ref())?;
        self.connection_resolver
            .register(correlation_id, &connection)
            .await?;
        Ok(())
    }
}
