//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & flatten)
//!     → params.rs (ConfigParams, dotted keys)
//!     → connection / credential sections picked up by the resolvers
//! ```
//!
//! # Design Decisions
//! - Values are kept as strings; typed views parse on access
//! - Sections are key prefixes, so nesting depth is unlimited

pub mod loader;
pub mod params;

pub use loader::{load_config, parse_config, LoadError};
pub use params::ConfigParams;
