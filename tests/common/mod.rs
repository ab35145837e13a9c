//! Shared lookup doubles for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use connection_resolver::error::BoxError;
use connection_resolver::{
    ConfigParams, ConnectionParams, CredentialParams, CredentialStore, Discovery,
};

/// Discovery backed by an in-process map.
#[derive(Default)]
pub struct MemoryDiscovery {
    items: Mutex<HashMap<String, Vec<ConnectionParams>>>,
}

impl MemoryDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `key` with one connection written as `k=v;k=v`.
    pub fn with(self, key: &str, connection: &str) -> Self {
        let params: ConfigParams = connection.parse().unwrap();
        self.items
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push(ConnectionParams::from(params));
        self
    }

    pub fn registered(&self, key: &str) -> Vec<ConnectionParams> {
        self.items
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl Discovery for MemoryDiscovery {
    async fn register(
        &self,
        _correlation_id: Option<&str>,
        key: &str,
        connection: &ConnectionParams,
    ) -> Result<(), BoxError> {
        self.items
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push(connection.clone());
        Ok(())
    }

    async fn resolve_one(
        &self,
        _correlation_id: Option<&str>,
        key: &str,
    ) -> Result<Option<ConnectionParams>, BoxError> {
        Ok(self.registered(key).into_iter().next())
    }

    async fn resolve_all(
        &self,
        _correlation_id: Option<&str>,
        key: &str,
    ) -> Result<Vec<ConnectionParams>, BoxError> {
        Ok(self.registered(key))
    }
}

/// Discovery whose every call fails.
pub struct FailingDiscovery;

#[async_trait]
impl Discovery for FailingDiscovery {
    async fn register(
        &self,
        _correlation_id: Option<&str>,
        _key: &str,
        _connection: &ConnectionParams,
    ) -> Result<(), BoxError> {
        Err("discovery unavailable".into())
    }

    async fn resolve_one(
        &self,
        _correlation_id: Option<&str>,
        _key: &str,
    ) -> Result<Option<ConnectionParams>, BoxError> {
        Err("discovery unavailable".into())
    }

    async fn resolve_all(
        &self,
        _correlation_id: Option<&str>,
        _key: &str,
    ) -> Result<Vec<ConnectionParams>, BoxError> {
        Err("discovery unavailable".into())
    }
}

/// Credential store backed by an in-process map.
#[derive(Default)]
pub struct MemoryCredentialStore {
    items: Mutex<HashMap<String, CredentialParams>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: &str, credential: &str) -> Self {
        let params: ConfigParams = credential.parse().unwrap();
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), CredentialParams::from(params));
        self
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn store(
        &self,
        _correlation_id: Option<&str>,
        key: &str,
        credential: &CredentialParams,
    ) -> Result<(), BoxError> {
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), credential.clone());
        Ok(())
    }

    async fn lookup(
        &self,
        _correlation_id: Option<&str>,
        key: &str,
    ) -> Result<Option<CredentialParams>, BoxError> {
        Ok(self.items.lock().unwrap().get(key).cloned())
    }
}
