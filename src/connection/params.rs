//! Connection parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ConfigParams;
use crate::connection::credential::{debug_redacted, CredentialParams};

/// Key-value connection parameters (`uri`, `protocol`, `host`, `port`, ...).
///
/// `Debug` masks secrets of an attached credential.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionParams {
    params: ConfigParams,
}

impl ConnectionParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tuples<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: ConfigParams::from_tuples(pairs),
        }
    }

    /// Read every configured connection.
    ///
    /// Named sub-sections of `connections` take precedence over a single
    /// `connection` section.
    pub fn many_from_config(config: &ConfigParams) -> Vec<Self> {
        let connections = config.section("connections");
        let names = connections.section_names();
        if !names.is_empty() {
            return names
                .iter()
                .map(|name| Self::from(connections.section(name)))
                .collect();
        }

        let single = config.section("connection");
        if single.is_empty() {
            Vec::new()
        } else {
            vec![Self::from(single)]
        }
    }

    /// First configured connection, if any.
    pub fn from_config(config: &ConfigParams) -> Option<Self> {
        Self::many_from_config(config).into_iter().next()
    }

    pub fn params(&self) -> &ConfigParams {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get_non_empty(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.set(key, value);
    }

    pub fn discovery_key(&self) -> Option<&str> {
        self.get("discovery_key")
    }

    /// True when the connection must be resolved through discovery.
    pub fn use_discovery(&self) -> bool {
        self.discovery_key().is_some()
    }

    pub fn uri(&self) -> Option<&str> {
        self.get("uri")
    }

    pub fn set_uri(&mut self, uri: impl Into<String>) {
        self.set("uri", uri);
    }

    pub fn protocol(&self) -> Option<&str> {
        self.get("protocol")
    }

    pub fn protocol_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.protocol().unwrap_or(default)
    }

    pub fn set_protocol(&mut self, protocol: impl Into<String>) {
        self.set("protocol", protocol);
    }

    /// Host name, falling back to the `ip` key.
    pub fn host(&self) -> Option<&str> {
        self.get("host").or_else(|| self.get("ip"))
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.set("host", host);
    }

    /// Port number; `0` when unset or not a valid port.
    pub fn port(&self) -> u16 {
        self.get("port")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn set_port(&mut self, port: u16) {
        self.set("port", port.to_string());
    }

    pub fn clear_port(&mut self) {
        self.params.remove("port");
    }

    /// Credential attached by normalization.
    pub fn credential(&self) -> CredentialParams {
        CredentialParams::from(self.params.section("credential"))
    }

    /// Replace the attached `credential` section.
    pub fn set_credential(&mut self, credential: &CredentialParams) {
        self.params.remove_section("credential");
        self.params.add_section("credential", credential.params());
    }

    /// Copy with `other` layered on top.
    pub fn merged(&self, other: &ConnectionParams) -> ConnectionParams {
        Self {
            params: self.params.merged(&other.params),
        }
    }
}

impl From<ConfigParams> for ConnectionParams {
    fn from(params: ConfigParams) -> Self {
        Self { params }
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_redacted(&self.params, f)
    }
}
