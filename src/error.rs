//! Error types shared by the resolvers and the validator.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Boxed error returned by injected lookup capabilities.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Machine-readable configuration error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No connection was configured or resolved.
    NoConnection,
    /// Protocol other than `http` or `https`.
    WrongProtocol,
    /// Connection host is not set.
    NoHost,
    /// Connection port is zero or unset.
    NoPort,
    /// HTTPS connection without any credential.
    NoCredential,
    /// HTTPS credential without `ssl_password`.
    NoSslPassword,
    /// HTTPS credential without `ssl_pfx_file`.
    NoSslPfxFile,
    /// Connection `uri` could not be parsed.
    InvalidUri,
    /// Connection needs discovery but no discovery service was provided.
    NoDiscovery,
    /// Credential needs a store but no credential store was provided.
    NoCredentialStore,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NoConnection => "NO_CONNECTION",
            ErrorCode::WrongProtocol => "WRONG_PROTOCOL",
            ErrorCode::NoHost => "NO_HOST",
            ErrorCode::NoPort => "NO_PORT",
            ErrorCode::NoCredential => "NO_CREDENTIAL",
            ErrorCode::NoSslPassword => "NO_SSL_PASSWORD",
            ErrorCode::NoSslPfxFile => "NO_SSL_PFX_FILE",
            ErrorCode::InvalidUri => "INVALID_URI",
            ErrorCode::NoDiscovery => "NO_DISCOVERY",
            ErrorCode::NoCredentialStore => "NO_CREDENTIAL_STORE",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A terminal configuration error for one resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}] {message}")]
pub struct ConfigError {
    /// Trace token of the call that failed.
    pub correlation_id: Option<String>,
    pub code: ErrorCode,
    pub message: String,
    /// Structured context, e.g. the offending protocol value.
    pub details: BTreeMap<String, String>,
}

impl ConfigError {
    pub fn new(correlation_id: Option<&str>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.map(str::to_string),
            code,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    /// Attach a detail entry.
    pub fn with_details(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

/// Errors surfaced by resolution operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or incomplete configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An injected discovery service or credential store failed.
    #[error("lookup of key {key:?} failed: {source}")]
    Lookup {
        correlation_id: Option<String>,
        key: String,
        #[source]
        source: BoxError,
    },
}

impl Error {
    pub(crate) fn lookup(correlation_id: Option<&str>, key: &str, source: BoxError) -> Self {
        Error::Lookup {
            correlation_id: correlation_id.map(str::to_string),
            key: key.to_string(),
            source,
        }
    }

    /// The configuration error code, if this is a configuration error.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Error::Config(e) => Some(e.code),
            Error::Lookup { .. } => None,
        }
    }

    pub fn correlation_id(&self) -> Option<&str> {
        match self {
            Error::Config(e) => e.correlation_id.as_deref(),
            Error::Lookup { correlation_id, .. } => correlation_id.as_deref(),
        }
    }
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, Error>;
