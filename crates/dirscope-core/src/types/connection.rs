//! Connection environment

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything needed to open an independent directory connection.
///
/// Read from a realm's system context and handed to a connector, so that the
/// query path never shares the realm's own connection.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEnvironment {
    /// Server URL (ldap:// or ldaps://)
    pub url: String,

    /// DN to bind as; empty for an anonymous bind
    #[serde(default)]
    pub bind_dn: String,

    #[serde(default)]
    pub bind_password: String,

    #[serde(default)]
    pub start_tls: bool,

    #[serde(default)]
    pub skip_tls_verify: bool,

    /// Connect timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Backend-specific options passed through untouched
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

fn default_timeout() -> u64 {
    crate::DEFAULT_TIMEOUT_SECONDS
}

impl ConnectionEnvironment {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            bind_dn: String::new(),
            bind_password: String::new(),
            start_tls: false,
            skip_tls_verify: false,
            timeout_seconds: default_timeout(),
            options: BTreeMap::new(),
        }
    }

    pub fn with_credentials(mut self, bind_dn: impl Into<String>, password: impl Into<String>) -> Self {
        self.bind_dn = bind_dn.into();
        self.bind_password = password.into();
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.bind_dn.is_empty()
    }
}

// Keep the bind password out of logs.
impl std::fmt::Debug for ConnectionEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionEnvironment")
            .field("url", &self.url)
            .field("bind_dn", &self.bind_dn)
            .field("bind_password", &"***")
            .field("start_tls", &self.start_tls)
            .field("skip_tls_verify", &self.skip_tls_verify)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_password() {
        let env = ConnectionEnvironment::new("ldap://localhost:389")
            .with_credentials("cn=admin,dc=example,dc=com", "s3cret");
        let printed = format!("{:?}", env);
        assert!(!printed.contains("s3cret"));
        assert!(printed.contains("cn=admin"));
        assert!(!env.is_anonymous());
    }
}
