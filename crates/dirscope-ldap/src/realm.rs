//! Collaborator capabilities
//!
//! The security realm owns the directory configuration; the connector knows
//! how to open a connection from an environment; a connection runs searches.

use async_trait::async_trait;
use dirscope_core::types::{ConnectionEnvironment, DirectoryRecord, SearchRequest};
use dirscope_core::Result;
use std::sync::Arc;

/// An open, bound directory connection
#[async_trait]
pub trait DirectoryConnection: Send {
    /// Environment this connection was opened with
    fn environment(&self) -> &ConnectionEnvironment;

    /// Start a search. Hits are read with [`DirectoryConnection::next_entry`].
    async fn search(&mut self, request: &SearchRequest) -> Result<()>;

    /// Next hit of the current search, `None` once exhausted
    async fn next_entry(&mut self) -> Result<Option<DirectoryRecord>>;

    /// Release the connection
    async fn close(&mut self) -> Result<()>;
}

/// Source of the realm's system-level directory context
#[async_trait]
pub trait ContextFactory: Send + Sync {
    /// System context, or `None` when the realm cannot provide one
    async fn system_context(&self) -> Result<Option<Box<dyn DirectoryConnection>>>;
}

/// External identity provider that also hands out directory connections
pub trait SecurityRealm: Send + Sync {
    fn context_factory(&self) -> Arc<dyn ContextFactory>;
}

/// Opens fresh connections from an environment
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, env: &ConnectionEnvironment) -> Result<Box<dyn DirectoryConnection>>;
}
