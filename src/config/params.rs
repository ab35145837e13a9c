//! Flat, dotted-key parameter maps.
//!
//! Nested configuration is stored as `section.sub.key = value` entries so
//! that a section can be cut out, merged or re-attached without caring
//! about the source format.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ordered map of dotted keys to string values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigParams {
    values: BTreeMap<String, String>,
}

impl ConfigParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(key, value)` pairs.
    pub fn from_tuples<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Flatten a TOML table.
    ///
    /// Tables join with `.`, array elements use their index as the key segment.
    pub fn from_toml(table: &toml::Table) -> Self {
        let mut params = Self::new();
        for (key, value) in table {
            flatten_toml(&mut params, key.clone(), value);
        }
        params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Like [`get`](Self::get), but treats an empty value as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries under `name.`, with the prefix stripped.
    pub fn section(&self, name: &str) -> ConfigParams {
        let prefix = format!("{}.", name);
        Self {
            values: self
                .values
                .iter()
                .filter_map(|(k, v)| {
                    k.strip_prefix(&prefix)
                        .filter(|rest| !rest.is_empty())
                        .map(|rest| (rest.to_string(), v.clone()))
                })
                .collect(),
        }
    }

    /// Distinct first segments of dotted keys, in key order.
    ///
    /// When every name is an array index the names are ordered numerically,
    /// so `[[connections]]` entries keep their declaration order.
    pub fn section_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for key in self.values.keys() {
            if let Some((name, _)) = key.split_once('.') {
                if !name.is_empty() && names.last().map(String::as_str) != Some(name) {
                    names.push(name.to_string());
                }
            }
        }

        if names.iter().all(|n| n.parse::<usize>().is_ok()) {
            names.sort_by_cached_key(|n| n.parse::<usize>().unwrap_or_default());
        }
        names
    }

    /// Write every entry of `section` under `name.`.
    pub fn add_section(&mut self, name: &str, section: &ConfigParams) {
        for (key, value) in &section.values {
            self.values.insert(format!("{}.{}", name, key), value.clone());
        }
    }

    /// Drop every entry under `name.`.
    pub fn remove_section(&mut self, name: &str) {
        let prefix = format!("{}.", name);
        self.values.retain(|k, _| !k.starts_with(&prefix));
    }

    /// Copy of `self` with `other` layered on top.
    pub fn merged(&self, other: &ConfigParams) -> ConfigParams {
        let mut values = self.values.clone();
        values.extend(other.values.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { values }
    }
}

/// Parses the `key1=value1;key2=value2` text form.
impl FromStr for ConfigParams {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut params = Self::new();
        for pair in s.split(';') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            match pair.split_once('=') {
                Some((key, value)) => params.set(key.trim(), value.trim()),
                None => params.set(pair, ""),
            }
        }
        Ok(params)
    }
}

impl std::fmt::Display for ConfigParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (key, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

fn flatten_toml(params: &mut ConfigParams, key: String, value: &toml::Value) {
    match value {
        toml::Value::Table(table) => {
            for (k, v) in table {
                flatten_toml(params, format!("{}.{}", key, k), v);
            }
        }
        toml::Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                flatten_toml(params, format!("{}.{}", key, i), v);
            }
        }
        toml::Value::String(s) => params.set(key, s.clone()),
        other => params.set(key, other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section() {
        let config = ConfigParams::from_tuples([
            ("connection.host", "localhost"),
            ("connection.port", "8080"),
            ("connectionx.host", "other"),
            ("credential.username", "admin"),
        ]);

        let section = config.section("connection");
        assert_eq!(section.len(), 2);
        assert_eq!(section.get("host"), Some("localhost"));
        assert_eq!(section.get("port"), Some("8080"));
    }

    #[test]
    fn test_section_names() {
        let config = ConfigParams::from_tuples([
            ("connections.b.host", "b"),
            ("connections.a.host", "a"),
            ("connections.a.port", "1"),
            ("plain", "x"),
        ]);
        assert_eq!(config.section_names(), vec!["connections".to_string()]);
        assert_eq!(
            config.section("connections").section_names(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_section_names_numeric_order() {
        let config = ConfigParams::from_tuples(
            (0..12).map(|i| (format!("connections.{}.host", i), format!("h{}", i))),
        );
        let expected: Vec<String> = (0..12).map(|i| i.to_string()).collect();
        assert_eq!(config.section("connections").section_names(), expected);

        let mixed = ConfigParams::from_tuples([("10.host", "a"), ("9.host", "b"), ("x.host", "c")]);
        assert_eq!(mixed.section_names(), vec!["10", "9", "x"]);
    }

    #[test]
    fn test_add_and_remove_section() {
        let mut config = ConfigParams::from_tuples([("uri", "http://h:1")]);
        let section = ConfigParams::from_tuples([("ssl_password", "secret")]);

        config.add_section("credential", &section);
        assert_eq!(config.get("credential.ssl_password"), Some("secret"));

        config.remove_section("credential");
        assert_eq!(config.len(), 1);
    }

    #[test]
    fn test_merged_overrides() {
        let base = ConfigParams::from_tuples([("host", "a"), ("port", "1")]);
        let over = ConfigParams::from_tuples([("host", "b")]);
        let merged = base.merged(&over);
        assert_eq!(merged.get("host"), Some("b"));
        assert_eq!(merged.get("port"), Some("1"));
    }

    #[test]
    fn test_parse_text_form() {
        let config: ConfigParams = " host = localhost ;port=8080;;flag".parse().unwrap();
        assert_eq!(config.get("host"), Some("localhost"));
        assert_eq!(config.get("port"), Some("8080"));
        assert_eq!(config.get("flag"), Some(""));
        assert_eq!(config.get_non_empty("flag"), None);
        assert_eq!(config.to_string(), "flag=;host=localhost;port=8080");
    }

    #[test]
    fn test_from_toml() {
        let table: toml::Table = toml::from_str(
            r#"
            [connection]
            protocol = "http"
            port = 8080

            [[servers]]
            host = "a"

            [[servers]]
            host = "b"
            secure = true
            "#,
        )
        .unwrap();

        let config = ConfigParams::from_toml(&table);
        assert_eq!(config.get("connection.protocol"), Some("http"));
        assert_eq!(config.get("connection.port"), Some("8080"));
        assert_eq!(config.get("servers.0.host"), Some("a"));
        assert_eq!(config.get("servers.1.secure"), Some("true"));
    }
}
