//! Read-only directory data access
//!
//! Bridges LDAP search results to typed entities:
//! - Connection acquisition through a security realm's context factory
//! - Subtree search with per-entity attribute mapping
//! - Single-result assertion
//! - Explicit rejection of every write-side operation

mod dao;
pub mod ldap;
mod mapper;
mod provider;
mod realm;
mod single;
mod user;

#[cfg(test)]
mod testing;

pub use dao::LdapDao;
pub use ldap::{Ldap3Connection, Ldap3Connector, LdapContextFactory, LdapRealm};
pub use mapper::AttributeMapper;
pub use provider::DirectoryContextProvider;
pub use realm::{ContextFactory, Connector, DirectoryConnection, SecurityRealm};
pub use single::assert_single;
pub use user::{AttributeMappings, DirectoryUser, UserMapper};
