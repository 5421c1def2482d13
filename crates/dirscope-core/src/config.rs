//! Configuration for Dirscope

use crate::types::ConnectionEnvironment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirscopeConfig {
    #[serde(default)]
    pub ldap: LdapConfigSection,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DirscopeConfig {
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read config: {}", e)))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("DIRSCOPE_LDAP_URL") {
            config.ldap.server_url = url;
        }
        if let Ok(dn) = std::env::var("DIRSCOPE_BIND_DN") {
            config.ldap.bind_dn = dn;
        }
        if let Ok(password) = std::env::var("DIRSCOPE_BIND_PASSWORD") {
            config.ldap.bind_password = password;
        }
        if let Ok(base) = std::env::var("DIRSCOPE_BASE_DN") {
            config.ldap.base_dn = base;
        }
        if std::env::var("DIRSCOPE_START_TLS").map(|v| v == "true").unwrap_or(false) {
            config.ldap.start_tls = true;
        }
        if let Ok(level) = std::env::var("DIRSCOPE_LOG_LEVEL") {
            config.logging.level = level;
        }

        config
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Directory server connection and mapping settings
#[derive(Clone, Serialize, Deserialize)]
pub struct LdapConfigSection {
    /// LDAP server URL (ldap:// or ldaps://)
    #[serde(default = "default_ldap_url")]
    pub server_url: String,

    /// Use STARTTLS
    #[serde(default)]
    pub start_tls: bool,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub skip_tls_verify: bool,

    /// Bind DN of the system account
    #[serde(default)]
    pub bind_dn: String,

    /// Bind password
    #[serde(default)]
    pub bind_password: String,

    /// Hand out an anonymous system context when no bind DN is configured
    #[serde(default)]
    pub allow_anonymous: bool,

    /// Default search base for queries that do not name one
    #[serde(default)]
    pub base_dn: String,

    /// Default search filter
    #[serde(default = "default_filter")]
    pub default_filter: String,

    /// Username attribute
    #[serde(default = "default_username_attr")]
    pub username_attribute: String,

    /// Email attribute
    #[serde(default = "default_email_attr")]
    pub email_attribute: String,

    /// Display name attribute
    #[serde(default = "default_displayname_attr")]
    pub display_name_attribute: String,

    /// Group membership attribute on user entries
    #[serde(default = "default_group_attr")]
    pub group_attribute: String,

    /// Connection timeout in seconds
    #[serde(default = "default_ldap_timeout")]
    pub timeout_seconds: u64,

    /// LDAP server type: ldap, active_directory, openldap.
    /// When set, its attribute and filter presets replace the configured ones.
    #[serde(default)]
    pub server_type: Option<LdapServerType>,

    /// Extra connection options passed to the backend
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

/// LDAP server type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LdapServerType {
    /// Generic LDAP server
    #[default]
    Ldap,
    /// Microsoft Active Directory
    #[serde(alias = "ad")]
    ActiveDirectory,
    /// OpenLDAP
    #[serde(alias = "openldap")]
    OpenLdap,
}

impl LdapServerType {
    /// Default filter matching person entries on this server type
    pub fn default_user_filter(&self) -> &'static str {
        match self {
            LdapServerType::ActiveDirectory => "(&(objectCategory=person)(objectClass=user))",
            _ => "(objectClass=inetOrgPerson)",
        }
    }
}

fn default_ldap_url() -> String {
    crate::DEFAULT_LDAP_URL.to_string()
}

fn default_filter() -> String {
    "(objectClass=person)".to_string()
}

fn default_username_attr() -> String {
    "uid".to_string()
}

fn default_email_attr() -> String {
    "mail".to_string()
}

fn default_displayname_attr() -> String {
    "cn".to_string()
}

fn default_group_attr() -> String {
    "memberOf".to_string()
}

fn default_ldap_timeout() -> u64 {
    crate::DEFAULT_TIMEOUT_SECONDS
}

impl Default for LdapConfigSection {
    fn default() -> Self {
        Self {
            server_url: default_ldap_url(),
            start_tls: false,
            skip_tls_verify: false,
            bind_dn: String::new(),
            bind_password: String::new(),
            allow_anonymous: false,
            base_dn: String::new(),
            default_filter: default_filter(),
            username_attribute: default_username_attr(),
            email_attribute: default_email_attr(),
            display_name_attribute: default_displayname_attr(),
            group_attribute: default_group_attr(),
            timeout_seconds: default_ldap_timeout(),
            server_type: None,
            options: BTreeMap::new(),
        }
    }
}

impl LdapConfigSection {
    pub fn validate(&self) -> crate::Result<()> {
        let url = url::Url::parse(&self.server_url).map_err(|e| {
            crate::Error::Config(format!("Invalid LDAP server URL '{}': {}", self.server_url, e))
        })?;

        match url.scheme() {
            "ldap" | "ldaps" | "ldapi" => {}
            other => {
                return Err(crate::Error::Config(format!(
                    "Unsupported LDAP URL scheme: {}",
                    other
                )))
            }
        }

        if url.scheme() == "ldaps" && self.start_tls {
            return Err(crate::Error::Config(
                "STARTTLS cannot be combined with an ldaps:// URL".into(),
            ));
        }

        if !self.bind_dn.is_empty() && self.bind_password.is_empty() {
            return Err(crate::Error::Config(
                "bind_dn is set but bind_password is empty".into(),
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(crate::Error::Config("timeout_seconds must be positive".into()));
        }

        Ok(())
    }

    /// Connection environment for the configured system account
    pub fn environment(&self) -> ConnectionEnvironment {
        ConnectionEnvironment {
            url: self.server_url.clone(),
            bind_dn: self.bind_dn.clone(),
            bind_password: self.bind_password.clone(),
            start_tls: self.start_tls,
            skip_tls_verify: self.skip_tls_verify,
            timeout_seconds: self.timeout_seconds,
            options: self.options.clone(),
        }
    }

    /// Copy with the bind password masked, for display
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.bind_password.is_empty() {
            copy.bind_password = "********".to_string();
        }
        copy
    }
}

impl std::fmt::Debug for LdapConfigSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = self.redacted();
        f.debug_struct("LdapConfigSection")
            .field("server_url", &shown.server_url)
            .field("start_tls", &shown.start_tls)
            .field("skip_tls_verify", &shown.skip_tls_verify)
            .field("bind_dn", &shown.bind_dn)
            .field("bind_password", &shown.bind_password)
            .field("allow_anonymous", &shown.allow_anonymous)
            .field("base_dn", &shown.base_dn)
            .field("default_filter", &shown.default_filter)
            .field("username_attribute", &shown.username_attribute)
            .field("email_attribute", &shown.email_attribute)
            .field("display_name_attribute", &shown.display_name_attribute)
            .field("group_attribute", &shown.group_attribute)
            .field("timeout_seconds", &shown.timeout_seconds)
            .field("server_type", &shown.server_type)
            .field("options", &shown.options)
            .finish()
    }
}
