//! Connection and credential parameter bags.
//!
//! Both are typed views over [`ConfigParams`](crate::config::ConfigParams):
//! values stay strings, accessors parse on read, and an empty value reads
//! as absent.

pub mod credential;
pub mod params;

pub use credential::CredentialParams;
pub use params::ConnectionParams;
