//! Config-backed security realm

use super::client::Ldap3Connection;
use crate::realm::{ContextFactory, DirectoryConnection, SecurityRealm};
use async_trait::async_trait;
use dirscope_core::config::LdapConfigSection;
use dirscope_core::types::ConnectionEnvironment;
use dirscope_core::Result;
use std::sync::Arc;
use tracing::debug;

/// Realm whose system account comes from the `[ldap]` config section
pub struct LdapRealm {
    factory: Arc<LdapContextFactory>,
}

impl LdapRealm {
    /// Validate the section and build the realm
    pub fn new(config: &LdapConfigSection) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            factory: Arc::new(LdapContextFactory {
                env: config.environment(),
                allow_anonymous: config.allow_anonymous,
            }),
        })
    }
}

impl SecurityRealm for LdapRealm {
    fn context_factory(&self) -> Arc<dyn ContextFactory> {
        self.factory.clone()
    }
}

/// Binds the realm's system account
pub struct LdapContextFactory {
    env: ConnectionEnvironment,
    allow_anonymous: bool,
}

impl LdapContextFactory {
    /// Whether a system context can be produced at all
    pub fn has_system_account(&self) -> bool {
        !self.env.is_anonymous() || self.allow_anonymous
    }
}

#[async_trait]
impl ContextFactory for LdapContextFactory {
    async fn system_context(&self) -> Result<Option<Box<dyn DirectoryConnection>>> {
        if !self.has_system_account() {
            debug!("No system account configured for {}", self.env.url);
            return Ok(None);
        }

        let conn = Ldap3Connection::open(self.env.clone()).await?;
        Ok(Some(Box::new(conn)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realm_rejects_invalid_config() {
        let config = LdapConfigSection {
            server_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(LdapRealm::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_no_system_account_yields_no_context() {
        let realm = LdapRealm::new(&LdapConfigSection::default()).unwrap();

        let context = realm.context_factory().system_context().await.unwrap();

        assert!(context.is_none());
    }

    #[test]
    fn test_anonymous_system_account() {
        let config = LdapConfigSection {
            allow_anonymous: true,
            ..Default::default()
        };
        let realm = LdapRealm::new(&config).unwrap();
        assert!(realm.factory.has_system_account());

        let config = LdapConfigSection {
            bind_dn: "cn=reader,dc=example,dc=com".to_string(),
            bind_password: "reader".to_string(),
            ..Default::default()
        };
        let realm = LdapRealm::new(&config).unwrap();
        assert!(realm.factory.has_system_account());
    }
}
