//! Directory user entity and its attribute mapping
//!
//! Supports:
//! - LDAP (OpenLDAP, 389 Directory Server)
//! - Active Directory
//! - Configurable attribute names

use crate::mapper::AttributeMapper;
use dirscope_core::config::{LdapConfigSection, LdapServerType};
use dirscope_core::types::{DirectoryRecord, Entity};
use dirscope_core::Result;
use serde::{Deserialize, Serialize};

// ============================================================================
// Attribute mappings
// ============================================================================

/// LDAP attribute names used to build a [`DirectoryUser`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AttributeMappings {
    /// Username attribute
    #[serde(default = "default_username_attr")]
    pub username: String,

    /// Email attribute
    #[serde(default = "default_email_attr")]
    pub email: String,

    /// Display name attribute
    #[serde(default = "default_display_name_attr")]
    pub display_name: String,

    /// Group membership attribute
    #[serde(default = "default_groups_attr")]
    pub groups: String,
}

fn default_username_attr() -> String {
    "uid".to_string()
}

fn default_email_attr() -> String {
    "mail".to_string()
}

fn default_display_name_attr() -> String {
    "cn".to_string()
}

fn default_groups_attr() -> String {
    "memberOf".to_string()
}

impl Default for AttributeMappings {
    fn default() -> Self {
        Self {
            username: default_username_attr(),
            email: default_email_attr(),
            display_name: default_display_name_attr(),
            groups: default_groups_attr(),
        }
    }
}

impl AttributeMappings {
    /// Get Active Directory default mappings
    pub fn active_directory() -> Self {
        Self {
            username: "sAMAccountName".to_string(),
            email: "mail".to_string(),
            display_name: "displayName".to_string(),
            groups: "memberOf".to_string(),
        }
    }

    /// Get OpenLDAP default mappings
    pub fn openldap() -> Self {
        Self::default()
    }

    /// Preset for a server type
    pub fn for_server_type(server_type: LdapServerType) -> Self {
        match server_type {
            LdapServerType::ActiveDirectory => Self::active_directory(),
            LdapServerType::OpenLdap => Self::openldap(),
            LdapServerType::Ldap => Self::default(),
        }
    }

    /// Mappings from the `[ldap]` config section
    pub fn from_config(config: &LdapConfigSection) -> Self {
        Self {
            username: config.username_attribute.clone(),
            email: config.email_attribute.clone(),
            display_name: config.display_name_attribute.clone(),
            groups: config.group_attribute.clone(),
        }
    }
}

// ============================================================================
// Directory user
// ============================================================================

/// A person entry read from the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// User DN (Distinguished Name)
    pub dn: String,

    /// Username
    pub username: String,

    /// Email address
    pub email: Option<String>,

    /// Display name
    pub display_name: Option<String>,

    /// DNs of groups the user belongs to
    #[serde(default)]
    pub groups: Vec<String>,
}

impl Entity for DirectoryUser {
    type Id = String;

    fn id(&self) -> Option<&String> {
        Some(&self.username)
    }
}

/// Maps person entries to [`DirectoryUser`]
#[derive(Debug, Clone, Default)]
pub struct UserMapper {
    mappings: AttributeMappings,
}

impl UserMapper {
    pub fn new(mappings: AttributeMappings) -> Self {
        Self { mappings }
    }
}

impl AttributeMapper<DirectoryUser> for UserMapper {
    fn to_object(&self, record: &DirectoryRecord) -> Result<DirectoryUser> {
        let m = &self.mappings;

        Ok(DirectoryUser {
            dn: record.dn.clone(),
            username: record.required(&m.username)?.to_string(),
            email: record.first(&m.email).map(str::to_string),
            display_name: record.first(&m.display_name).map(str::to_string),
            groups: record
                .get(&m.groups)
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
        })
    }

    fn to_entity(&self, user: &DirectoryUser) -> Vec<DirectoryRecord> {
        let m = &self.mappings;
        let mut record = DirectoryRecord::new(user.dn.clone())
            .with_attribute(m.username.clone(), [user.username.clone()]);

        if let Some(email) = &user.email {
            record.push(m.email.clone(), [email.clone()]);
        }
        if let Some(name) = &user.display_name {
            record.push(m.display_name.clone(), [name.clone()]);
        }
        if !user.groups.is_empty() {
            record.push(m.groups.clone(), user.groups.iter().cloned());
        }

        vec![record]
    }

    fn attributes(&self) -> Vec<String> {
        let m = &self.mappings;
        vec![
            m.username.clone(),
            m.email.clone(),
            m.display_name.clone(),
            m.groups.clone(),
        ]
    }
}
