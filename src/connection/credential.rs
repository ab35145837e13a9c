//! Credential parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ConfigParams;

/// Keys whose values never appear in `Debug` output.
const SECRET_KEYS: &[&str] = &["password", "ssl_password", "access_key"];

/// True for a secret key, bare or under the `credential.` section.
fn is_secret_key(key: &str) -> bool {
    let key = key.strip_prefix("credential.").unwrap_or(key);
    SECRET_KEYS.contains(&key)
}

/// Write `params` as a debug map with secret values masked.
pub(crate) fn debug_redacted(
    params: &ConfigParams,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let mut map = f.debug_map();
    for (key, value) in params.iter() {
        if is_secret_key(key) {
            map.entry(&key, &"***");
        } else {
            map.entry(&key, &value);
        }
    }
    map.finish()
}

/// Key-value credential parameters (TLS material and auth secrets).
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialParams {
    params: ConfigParams,
}

impl CredentialParams {
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

    /// Read every configured credential.
    ///
    /// Named sub-sections of `credentials` take precedence over a single
    /// `credential` section.
    pub fn many_from_config(config: &ConfigParams) -> Vec<Self> {
        let credentials = config.section("credentials");
        let names = credentials.section_names();
        if !names.is_empty() {
            return names
                .iter()
                .map(|name| Self::from(credentials.section(name)))
                .collect();
        }

        let single = config.section("credential");
        if single.is_empty() {
            Vec::new()
        } else {
            vec![Self::from(single)]
        }
    }

    pub fn params(&self) -> &ConfigParams {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get_non_empty(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.set(key, value);
    }

    pub fn store_key(&self) -> Option<&str> {
        self.get("store_key")
    }

    /// True when the credential must be looked up in a credential store.
    pub fn use_credential_store(&self) -> bool {
        self.store_key().is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.get("username")
    }

    pub fn password(&self) -> Option<&str> {
        self.get("password")
    }

    /// Trusted-network marker exempting HTTPS from certificate checks.
    pub fn internal_network(&self) -> Option<&str> {
        self.get("internal_network")
    }

    pub fn ssl_password(&self) -> Option<&str> {
        self.get("ssl_password")
    }

    pub fn ssl_pfx_file(&self) -> Option<&str> {
        self.get("ssl_pfx_file")
    }
}

impl From<ConfigParams> for CredentialParams {
    fn from(params: ConfigParams) -> Self {
        Self { params }
    }
}

impl fmt::Debug for CredentialParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_redacted(&self.params, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_many_from_config() {
        let config = ConfigParams::from_tuples([
            ("credentials.tls.ssl_pfx_file", "server.pfx"),
            ("credentials.tls.ssl_password", "secret"),
            ("credentials.vault.store_key", "http:tls"),
        ]);

        let credentials = CredentialParams::many_from_config(&config);
        assert_eq!(credentials.len(), 2);
        assert_eq!(credentials[0].ssl_pfx_file(), Some("server.pfx"));
        assert!(!credentials[0].use_credential_store());
        assert_eq!(credentials[1].store_key(), Some("http:tls"));
    }

    #[test]
    fn test_single_credential_section() {
        let config = ConfigParams::from_tuples([("credential.internal_network", "true")]);
        let credentials = CredentialParams::many_from_config(&config);
        assert_eq!(credentials.len(), 1);
        assert_eq!(credentials[0].internal_network(), Some("true"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credential = CredentialParams::from_tuples([
            ("username", "admin"),
            ("ssl_password", "hunter2"),
            ("password", "hunter3"),
        ]);
        assert_eq!(credential.username(), Some("admin"));
        assert_eq!(credential.password(), Some("hunter3"));

        let out = format!("{:?}", credential);
        assert!(out.contains("admin"));
        assert!(!out.contains("hunter2"));
        assert!(!out.contains("hunter3"));
    }
}
