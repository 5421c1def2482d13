//! Dirscope Core Library
//!
//! Core types, traits, and configuration for read-only directory data access.

pub mod config;
pub mod dao;
pub mod error;
pub mod types;

pub use config::DirscopeConfig;
pub use dao::GenericDao;
pub use error::{Error, Result};

/// Dirscope version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default LDAP server URL
pub const DEFAULT_LDAP_URL: &str = "ldap://localhost:389";

/// Default connection timeout (seconds)
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
