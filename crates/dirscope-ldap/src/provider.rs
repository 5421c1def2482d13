//! Directory context acquisition

use crate::realm::{Connector, DirectoryConnection, SecurityRealm};
use dirscope_core::{Error, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// Opens a fresh directory connection per call from the realm's environment.
///
/// The realm's system context is only read for its environment and then
/// released; the returned connection is owned by the caller.
#[derive(Clone)]
pub struct DirectoryContextProvider {
    realm: Arc<dyn SecurityRealm>,
    connector: Arc<dyn Connector>,
}

impl DirectoryContextProvider {
    pub fn new(realm: Arc<dyn SecurityRealm>, connector: Arc<dyn Connector>) -> Self {
        Self { realm, connector }
    }

    /// Acquire a usable directory connection
    pub async fn acquire_context(&self) -> Result<Box<dyn DirectoryConnection>> {
        let factory = self.realm.context_factory();

        let mut system = factory.system_context().await?.ok_or_else(|| {
            Error::ContextUnavailable("Failed to get system LDAP context".to_string())
        })?;

        let env = system.environment().clone();

        if let Err(e) = system.close().await {
            warn!("Failed to release system LDAP context: {}", e);
        }

        debug!("Opening directory connection to {}", env.url);
        self.connector.connect(&env).await
    }
}
