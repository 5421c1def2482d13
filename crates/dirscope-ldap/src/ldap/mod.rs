//! `ldap3` backend
//!
//! Provides:
//! - A config-backed security realm bound to the system account
//! - A connector opening fresh connections from a realm environment
//! - TLS/STARTTLS support

mod client;
mod realm;

pub use client::{Ldap3Connection, Ldap3Connector};
pub use realm::{LdapContextFactory, LdapRealm};
