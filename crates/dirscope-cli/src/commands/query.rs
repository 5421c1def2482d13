//! query command - subtree search printing matching users

use super::CommandContext;
use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;
use dirscope_core::config::LdapConfigSection;
use dirscope_ldap::{AttributeMappings, DirectoryUser, LdapDao, UserMapper};
use tracing::info;

pub async fn execute(
    ctx: &CommandContext,
    base: Option<&str>,
    filter: Option<&str>,
    single: bool,
) -> Result<()> {
    let ldap = &ctx.config.ldap;

    let base = base.unwrap_or(&ldap.base_dn);
    if base.is_empty() {
        bail!("No search base given; pass --base or set ldap.base_dn");
    }
    let filter = filter.unwrap_or_else(|| default_filter(ldap));

    let dao: LdapDao<DirectoryUser, _> = LdapDao::from_config(ldap, UserMapper::new(mappings(ctx)))
        .context("Invalid LDAP configuration")?;

    info!("Querying {} with filter {}", base, filter);

    let outcome = if single {
        dao.query_single(base, filter).await.map(|user| vec![user])
    } else {
        dao.query(base, filter).await
    };
    let users = outcome.map_err(|e| anyhow!("[{}] {}", e.code(), e))?;

    if ctx.is_json() {
        println!("{}", serde_json::to_string_pretty(&users)?);
    } else {
        print_table(&users);
    }

    Ok(())
}

/// Configured attribute names, or the server type's preset when one is named
fn mappings(ctx: &CommandContext) -> AttributeMappings {
    let ldap = &ctx.config.ldap;
    match ldap.server_type {
        Some(server_type) => AttributeMappings::for_server_type(server_type),
        None => AttributeMappings::from_config(ldap),
    }
}

/// Filter used when none is given on the command line
fn default_filter(ldap: &LdapConfigSection) -> &str {
    match ldap.server_type {
        Some(server_type) => server_type.default_user_filter(),
        None => ldap.default_filter.as_str(),
    }
}

fn print_table(users: &[DirectoryUser]) {
    if users.is_empty() {
        println!("{}", "No entries found".dimmed());
        return;
    }

    for user in users {
        println!("{}", user.dn.bold());
        println!("  {:<14}{}", "username:", user.username);
        if let Some(email) = &user.email {
            println!("  {:<14}{}", "email:", email);
        }
        if let Some(name) = &user.display_name {
            println!("  {:<14}{}", "display name:", name);
        }
        for group in &user.groups {
            println!("  {:<14}{}", "group:", group.cyan());
        }
    }

    println!("\n{} entries", users.len().to_string().green());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputFormat;
    use dirscope_core::config::{DirscopeConfig, LdapServerType};

    fn ctx(config: DirscopeConfig) -> CommandContext {
        CommandContext {
            config,
            output_format: OutputFormat::Table,
        }
    }

    #[test]
    fn test_server_type_preset_wins() {
        let mut config = DirscopeConfig::default();
        config.ldap.server_type = Some(LdapServerType::ActiveDirectory);

        assert_eq!(mappings(&ctx(config)).username, "sAMAccountName");
    }

    #[test]
    fn test_fallback_filter_follows_server_type() {
        let mut config = DirscopeConfig::default();
        config.ldap.default_filter = "(objectClass=account)".to_string();
        assert_eq!(default_filter(&config.ldap), "(objectClass=account)");

        config.ldap.server_type = Some(LdapServerType::ActiveDirectory);
        assert_eq!(
            default_filter(&config.ldap),
            "(&(objectCategory=person)(objectClass=user))"
        );

        config.ldap.server_type = Some(LdapServerType::OpenLdap);
        assert_eq!(default_filter(&config.ldap), "(objectClass=inetOrgPerson)");
    }

    #[tokio::test]
    async fn test_directory_errors_carry_code() {
        // No bind DN and anonymous access disabled: the realm has no system context
        let mut config = DirscopeConfig::default();
        config.ldap.base_dn = "ou=users,dc=example,dc=com".to_string();

        let err = execute(&ctx(config), None, None, false).await.unwrap_err();

        assert!(err.to_string().starts_with("[ContextUnavailable]"));
    }

    #[test]
    fn test_configured_attributes_without_server_type() {
        let mut config = DirscopeConfig::default();
        config.ldap.email_attribute = "userPrincipalName".to_string();

        assert_eq!(mappings(&ctx(config)).email, "userPrincipalName");
    }

    #[tokio::test]
    async fn test_missing_base_is_rejected() {
        let err = execute(&ctx(DirscopeConfig::default()), None, None, false)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("--base"));
    }
}
