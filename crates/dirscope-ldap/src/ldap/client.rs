//! LDAP connection implementation
//!
//! Opens and binds connections with `ldap3`, runs searches and hands hits
//! back as [`DirectoryRecord`]s. Supports LDAP, LDAPS (SSL), and STARTTLS.

use crate::realm::{Connector, DirectoryConnection};
use async_trait::async_trait;
use dirscope_core::types::{ConnectionEnvironment, DirectoryRecord, SearchRequest, SearchScope};
use dirscope_core::{Error, Result};
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, Scope, SearchEntry};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::debug;

/// Opens [`Ldap3Connection`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct Ldap3Connector;

#[async_trait]
impl Connector for Ldap3Connector {
    async fn connect(&self, env: &ConnectionEnvironment) -> Result<Box<dyn DirectoryConnection>> {
        let conn = Ldap3Connection::open(env.clone()).await?;
        Ok(Box::new(conn))
    }
}

/// A bound `ldap3` connection
pub struct Ldap3Connection {
    env: ConnectionEnvironment,
    ldap: Ldap,
    pending: VecDeque<DirectoryRecord>,
    closed: bool,
}

impl Ldap3Connection {
    /// Connect and bind with the environment's credentials
    pub async fn open(env: ConnectionEnvironment) -> Result<Self> {
        let settings = LdapConnSettings::new()
            .set_conn_timeout(Duration::from_secs(env.timeout_seconds))
            .set_starttls(env.start_tls)
            .set_no_tls_verify(env.skip_tls_verify);

        debug!("Connecting to LDAP server: {}", env.url);

        let (conn, mut ldap) = LdapConnAsync::with_settings(settings, &env.url)
            .await
            .map_err(|e| protocol("Failed to connect to LDAP server", e))?;

        ldap3::drive!(conn);

        if !env.is_anonymous() {
            let result = ldap
                .simple_bind(&env.bind_dn, &env.bind_password)
                .await
                .map_err(|e| protocol("Bind failed", e))?;

            if result.rc != 0 {
                let _ = ldap.unbind().await;
                return Err(Error::ProtocolFailure(format!(
                    "Bind failed with code: {}",
                    result.rc
                )));
            }
        }

        Ok(Self {
            env,
            ldap,
            pending: VecDeque::new(),
            closed: false,
        })
    }
}

#[async_trait]
impl DirectoryConnection for Ldap3Connection {
    fn environment(&self) -> &ConnectionEnvironment {
        &self.env
    }

    async fn search(&mut self, request: &SearchRequest) -> Result<()> {
        let (rs, _res) = self
            .ldap
            .search(
                &request.base,
                scope(request.scope),
                &request.filter,
                request.wire_attributes(),
            )
            .await
            .map_err(|e| protocol("Search failed", e))?
            .success()
            .map_err(|e| protocol("Search error", e))?;

        self.pending = rs
            .into_iter()
            .map(|entry| to_record(SearchEntry::construct(entry)))
            .collect();

        Ok(())
    }

    async fn next_entry(&mut self) -> Result<Option<DirectoryRecord>> {
        Ok(self.pending.pop_front())
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.pending.clear();

        self.ldap
            .unbind()
            .await
            .map_err(|e| protocol("Unbind failed", e))
    }
}

fn scope(scope: SearchScope) -> Scope {
    match scope {
        SearchScope::Object => Scope::Base,
        SearchScope::OneLevel => Scope::OneLevel,
        SearchScope::Subtree => Scope::Subtree,
    }
}

fn protocol(context: &str, err: ldap3::LdapError) -> Error {
    Error::ProtocolFailure(format!("{}: {}", context, err))
}

/// Convert a search hit, ordering attributes by name.
///
/// Binary-only attributes are dropped.
fn to_record(entry: SearchEntry) -> DirectoryRecord {
    let mut attrs: Vec<(String, Vec<String>)> = entry.attrs.into_iter().collect();
    attrs.sort_by(|a, b| a.0.cmp(&b.0));

    let mut record = DirectoryRecord::new(entry.dn);
    for (name, values) in attrs {
        record.push(name, values);
    }
    record
}
