//! HTTP connection validation and normalization.
//!
//! # Responsibilities
//! - Check a resolved connection/credential pair against HTTP and HTTPS rules
//! - Produce the canonical form: a `uri` plus matching `protocol`, `host`, `port`
//! - Attach credentials only where HTTPS actually needs them
//!
//! # Design Decisions
//! - A non-empty `uri` is authoritative: validation accepts it without looking
//!   at the other fields, and normalization derives those fields from it
//! - `internal_network` on the credential exempts HTTPS from certificate checks
//!   and keeps the credential off the normalized connection

use url::Url;

use crate::connection::{ConnectionParams, CredentialParams};
use crate::error::{ConfigError, ErrorCode};

const DEFAULT_PROTOCOL: &str = "http";

/// Validate a resolved connection and its credential.
pub fn validate_connection(
    correlation_id: Option<&str>,
    connection: Option<&ConnectionParams>,
    credential: Option<&CredentialParams>,
) -> Result<(), ConfigError> {
    let connection = connection.ok_or_else(|| missing_connection(correlation_id))?;

    if connection.uri().is_some() {
        return Ok(());
    }

    let protocol = connection.protocol_or(DEFAULT_PROTOCOL);
    if protocol != "http" && protocol != "https" {
        return Err(ConfigError::new(
            correlation_id,
            ErrorCode::WrongProtocol,
            "Protocol is not supported by REST connection",
        )
        .with_details("protocol", protocol));
    }

    if connection.host().is_none() {
        return Err(ConfigError::new(
            correlation_id,
            ErrorCode::NoHost,
            "Connection host is not set",
        ));
    }

    if connection.port() == 0 {
        return Err(ConfigError::new(
            correlation_id,
            ErrorCode::NoPort,
            "Connection port is not set",
        ));
    }

    if protocol == "https" {
        validate_tls_credential(correlation_id, credential)?;
    }

    Ok(())
}

/// The error reported when no connection could be resolved.
pub fn missing_connection(correlation_id: Option<&str>) -> ConfigError {
    ConfigError::new(correlation_id, ErrorCode::NoConnection, "HTTP connection is not set")
}

fn validate_tls_credential(
    correlation_id: Option<&str>,
    credential: Option<&CredentialParams>,
) -> Result<(), ConfigError> {
    let credential = credential.ok_or_else(|| {
        ConfigError::new(
            correlation_id,
            ErrorCode::NoCredential,
            "SSL certificates are not configured for HTTPS protocol",
        )
    })?;

    if credential.internal_network().is_some() {
        return Ok(());
    }

    if credential.ssl_password().is_none() {
        return Err(ConfigError::new(
            correlation_id,
            ErrorCode::NoSslPassword,
            "SSL password is not configured in credentials",
        ));
    }

    if credential.ssl_pfx_file().is_none() {
        return Err(ConfigError::new(
            correlation_id,
            ErrorCode::NoSslPfxFile,
            "SSL pfx file is not configured in credentials",
        ));
    }

    Ok(())
}

/// How a connection reaches its canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalization {
    /// No `uri`: compose one from the individual fields.
    Compose {
        protocol: String,
        host: String,
        port: u16,
    },
    /// `uri` present: take the individual fields from it.
    Decompose(Url),
}

impl Normalization {
    /// Pick the strategy for `connection`.
    pub fn plan(
        correlation_id: Option<&str>,
        connection: &ConnectionParams,
    ) -> Result<Self, ConfigError> {
        let Some(uri) = connection.uri() else {
            return Ok(Normalization::Compose {
                protocol: connection.protocol_or(DEFAULT_PROTOCOL).to_string(),
                host: connection.host().unwrap_or_default().to_string(),
                port: connection.port(),
            });
        };

        let invalid = |message: String| {
            ConfigError::new(correlation_id, ErrorCode::InvalidUri, message)
                .with_details("uri", uri)
        };
        let url =
            Url::parse(uri).map_err(|e| invalid(format!("Connection uri is invalid: {}", e)))?;
        if url.host_str().is_none() {
            return Err(invalid("Connection uri has no host".to_string()));
        }

        Ok(Normalization::Decompose(url))
    }

    /// Write the canonical fields into `connection`.
    pub fn apply(self, connection: &mut ConnectionParams) {
        match self {
            Normalization::Compose {
                protocol,
                host,
                port,
            } => {
                let uri = if port == 0 {
                    format!("{}://{}", protocol, host)
                } else {
                    format!("{}://{}:{}", protocol, host, port)
                };
                connection.set_uri(uri);
                connection.set_protocol(protocol);
                if !host.is_empty() {
                    connection.set_host(host);
                }
            }
            Normalization::Decompose(url) => {
                connection.set_protocol(url.scheme());
                connection.set_host(url.host_str().unwrap_or_default());
                match url.port_or_known_default() {
                    Some(port) => connection.set_port(port),
                    None => connection.clear_port(),
                }
            }
        }
    }
}

/// Bring `connection` into canonical form and attach its credential section.
///
/// The credential is attached in full only for HTTPS outside an internal
/// network; every other connection gets an empty section.
pub fn normalize_connection(
    correlation_id: Option<&str>,
    connection: &mut ConnectionParams,
    credential: Option<&CredentialParams>,
) -> Result<(), ConfigError> {
    Normalization::plan(correlation_id, connection)?.apply(connection);

    let attached = match credential {
        Some(c) if connection.protocol() == Some("https") && c.internal_network().is_none() => {
            c.clone()
        }
        _ => CredentialParams::new(),
    };
    connection.set_credential(&attached);

    Ok(())
}
