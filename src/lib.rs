//! HTTP connection resolution library.
//!
//! Resolves connection and credential parameters from configuration,
//! optionally through injected discovery services and credential stores,
//! then validates them for HTTP/HTTPS and normalizes them into a
//! URI-bearing canonical form.

pub mod config;
pub mod connection;
pub mod error;
pub mod http;
pub mod lookup;
pub mod observability;
pub mod resolver;

pub use config::ConfigParams;
pub use connection::{ConnectionParams, CredentialParams};
pub use error::{ConfigError, Error, ErrorCode};
pub use http::HttpConnectionResolver;
pub use lookup::{CredentialStore, Discovery};
