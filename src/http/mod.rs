//! HTTP connection subsystem.
//!
//! # Data Flow
//! ```text
//! HttpConnectionResolver::resolve(correlation_id)
//!     → ConnectionResolver (configured / discovered connection)
//!     → CredentialResolver (configured / stored credential)
//!     → validator.rs (HTTP/HTTPS rules)
//!     → validator.rs (normalize: uri ⇄ protocol/host/port, credential section)
//!     → canonical ConnectionParams
//! ```

pub mod resolver;
pub mod validator;

pub use resolver::HttpConnectionResolver;
pub use validator::{normalize_connection, validate_connection, Normalization};
