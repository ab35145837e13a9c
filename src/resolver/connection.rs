//! Connection resolution with optional discovery lookup.

use std::sync::Arc;

use crate::config::ConfigParams;
use crate::connection::ConnectionParams;
use crate::error::{ConfigError, Error, ErrorCode, Result};
use crate::lookup::Discovery;

/// Holds configured connections and resolves them, through discovery
/// when a connection carries a `discovery_key`.
#[derive(Clone, Default)]
pub struct ConnectionResolver {
    connections: Vec<ConnectionParams>,
    discoveries: Vec<Arc<dyn Discovery>>,
}

impl ConnectionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver that consults `discoveries` in order.
    pub fn with_discoveries(discoveries: Vec<Arc<dyn Discovery>>) -> Self {
        Self {
            connections: Vec::new(),
            discoveries,
        }
    }

    /// Append connections found in `config`.
    pub fn configure(&mut self, config: &ConfigParams) {
        self.connections
            .extend(ConnectionParams::many_from_config(config));
    }

    pub fn add(&mut self, connection: ConnectionParams) {
        self.connections.push(connection);
    }

    pub fn connections(&self) -> &[ConnectionParams] {
        &self.connections
    }

    /// Resolve a single connection.
    ///
    /// A connection without a discovery key wins outright. Otherwise the
    /// first discovery hit is merged over its configured connection.
    pub async fn resolve(&self, correlation_id: Option<&str>) -> Result<Option<ConnectionParams>> {
        if let Some(plain) = self.connections.iter().find(|c| !c.use_discovery()) {
            return Ok(Some(plain.clone()));
        }

        for connection in &self.connections {
            if let Some(found) = self.resolve_in_discovery(correlation_id, connection).await? {
                tracing::debug!(
                    correlation_id = correlation_id.unwrap_or_default(),
                    discovery_key = connection.discovery_key().unwrap_or_default(),
                    "Connection resolved via discovery"
                );
                return Ok(Some(connection.merged(&found)));
            }
        }

        Ok(None)
    }

    /// Resolve every configured connection, expanding discovery keys.
    pub async fn resolve_all(&self, correlation_id: Option<&str>) -> Result<Vec<ConnectionParams>> {
        let mut resolved = Vec::new();

        for connection in &self.connections {
            if !connection.use_discovery() {
                resolved.push(connection.clone());
                continue;
            }

            let found = self.resolve_all_in_discovery(correlation_id, connection).await?;
            resolved.extend(found.iter().map(|f| connection.merged(f)));
        }

        Ok(resolved)
    }

    /// Register `connection` with every discovery.
    ///
    /// Returns `false` when the connection has no discovery key.
    pub async fn register(
        &self,
        correlation_id: Option<&str>,
        connection: &ConnectionParams,
    ) -> Result<bool> {
        let Some(key) = connection.discovery_key() else {
            return Ok(false);
        };
        let discoveries = self.require_discoveries(correlation_id, key)?;

        for discovery in discoveries {
            discovery
                .register(correlation_id, key, connection)
                .await
                .map_err(|e| Error::lookup(correlation_id, key, e))?;
        }

        tracing::debug!(
            correlation_id = correlation_id.unwrap_or_default(),
            discovery_key = key,
            "Connection registered"
        );
        Ok(true)
    }

    async fn resolve_in_discovery(
        &self,
        correlation_id: Option<&str>,
        connection: &ConnectionParams,
    ) -> Result<Option<ConnectionParams>> {
        let Some(key) = connection.discovery_key() else {
            return Ok(None);
        };

        for discovery in self.require_discoveries(correlation_id, key)? {
            let found = discovery
                .resolve_one(correlation_id, key)
                .await
                .map_err(|e| Error::lookup(correlation_id, key, e))?;
            if found.is_some() {
                return Ok(found);
            }
        }

        Ok(None)
    }

    async fn resolve_all_in_discovery(
        &self,
        correlation_id: Option<&str>,
        connection: &ConnectionParams,
    ) -> Result<Vec<ConnectionParams>> {
        let Some(key) = connection.discovery_key() else {
            return Ok(Vec::new());
        };

        let mut found = Vec::new();
        for discovery in self.require_discoveries(correlation_id, key)? {
            let mut batch = discovery
                .resolve_all(correlation_id, key)
                .await
                .map_err(|e| Error::lookup(correlation_id, key, e))?;
            found.append(&mut batch);
        }

        Ok(found)
    }

    fn require_discoveries(
        &self,
        correlation_id: Option<&str>,
        key: &str,
    ) -> std::result::Result<&[Arc<dyn Discovery>], ConfigError> {
        if self.discoveries.is_empty() {
            return Err(ConfigError::new(
                correlation_id,
                ErrorCode::NoDiscovery,
                "Discovery wasn't found to make resolution",
            )
            .with_details("discovery_key", key));
        }
        Ok(&self.discoveries)
    }
}

impl std::fmt::Debug for ConnectionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionResolver")
            .field("connections", &self.connections)
            .field("discoveries", &self.discoveries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_without_connections() {
        let resolver = ConnectionResolver::new();
        assert!(resolver.resolve(None).await.unwrap().is_none());
        assert!(resolver.resolve_all(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_plain_connection_wins() {
        let mut resolver = ConnectionResolver::new();
        resolver.add(ConnectionParams::from_tuples([("discovery_key", "svc:http")]));
        resolver.add(ConnectionParams::from_tuples([("host", "localhost"), ("port", "80")]));

        let connection = resolver.resolve(Some("123")).await.unwrap().unwrap();
        assert_eq!(connection.host(), Some("localhost"));
    }

    #[test]
    fn test_configure_appends() {
        let mut resolver = ConnectionResolver::new();
        resolver.configure(&ConfigParams::from_tuples([("connection.host", "a")]));
        resolver.configure(&ConfigParams::from_tuples([
            ("connections.x.host", "b"),
            ("connections.y.discovery_key", "svc"),
        ]));

        let connections = resolver.connections();
        assert_eq!(connections.len(), 3);
        assert_eq!(connections[0].host(), Some("a"));
        assert_eq!(connections[1].host(), Some("b"));
        assert!(connections[2].use_discovery());
    }

    #[tokio::test]
    async fn test_discovery_required() {
        let config = ConfigParams::from_tuples([("connection.discovery_key", "svc:http")]);
        let mut resolver = ConnectionResolver::new();
        resolver.configure(&config);

        let err = resolver.resolve(Some("123")).await.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::NoDiscovery));
        assert_eq!(err.correlation_id(), Some("123"));
    }

    #[tokio::test]
    async fn test_register_skips_plain_connection() {
        let resolver = ConnectionResolver::new();
        let connection = ConnectionParams::from_tuples([("host", "localhost")]);
        assert!(!resolver.register(None, &connection).await.unwrap());
    }
}
