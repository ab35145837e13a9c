//! Parameter resolution subsystem.
//!
//! # Data Flow
//! ```text
//! ConfigParams
//!     → connection.rs (connection / connections sections)
//!         → discovery lookup when discovery_key is set
//!     → credential.rs (credential / credentials sections)
//!         → credential store lookup when store_key is set
//!     → raw ConnectionParams / CredentialParams for validation
//! ```
//!
//! # Design Decisions
//! - Entries without indirection win over those needing a lookup
//! - Lookups run sequentially, in injection order
//! - Resolvers are read-only once configured

pub mod connection;
pub mod credential;

pub use connection::ConnectionResolver;
pub use credential::CredentialResolver;
