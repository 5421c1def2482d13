//! Read-only LDAP data access object

use crate::ldap::{Ldap3Connector, LdapRealm};
use crate::mapper::AttributeMapper;
use crate::provider::DirectoryContextProvider;
use crate::realm::{Connector, DirectoryConnection, SecurityRealm};
use crate::single::assert_single;
use async_trait::async_trait;
use dirscope_core::config::LdapConfigSection;
use dirscope_core::types::{Entity, SearchRequest};
use dirscope_core::{Error, GenericDao, Result};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// Directory-backed DAO for entities of type `T`.
///
/// Only [`LdapDao::query`] touches the directory. Every operation of the
/// [`GenericDao`] contract fails with [`Error::MethodNotAllowed`].
pub struct LdapDao<T, M> {
    provider: DirectoryContextProvider,
    mapper: M,
    _entity: PhantomData<fn() -> T>,
}

impl<T, M> LdapDao<T, M>
where
    T: Entity,
    M: AttributeMapper<T>,
{
    pub fn new(realm: Arc<dyn SecurityRealm>, connector: Arc<dyn Connector>, mapper: M) -> Self {
        Self::with_provider(DirectoryContextProvider::new(realm, connector), mapper)
    }

    pub fn with_provider(provider: DirectoryContextProvider, mapper: M) -> Self {
        Self {
            provider,
            mapper,
            _entity: PhantomData,
        }
    }

    /// DAO over the `ldap3` backend for the configured directory
    pub fn from_config(config: &LdapConfigSection, mapper: M) -> Result<Self> {
        let realm = LdapRealm::new(config)?;
        Ok(Self::new(Arc::new(realm), Arc::new(Ldap3Connector), mapper))
    }

    /// Subtree search under `base`, mapping every hit in directory order.
    ///
    /// The connection is released before returning, whether or not the
    /// search succeeded.
    pub async fn query(&self, base: &str, filter: &str) -> Result<Vec<T>> {
        let mut conn = self.provider.acquire_context().await?;

        let request =
            SearchRequest::subtree(base, filter).with_attributes(self.mapper.attributes());

        debug!("Searching subtree {} with filter: {}", base, filter);
        let outcome = self.collect(conn.as_mut(), &request).await;

        if let Err(e) = conn.close().await {
            warn!("Failed to release LDAP connection: {}", e);
        }

        if let Ok(entities) = &outcome {
            debug!("Found {} entries under {}", entities.len(), base);
        }
        outcome
    }

    /// [`LdapDao::query`] expecting exactly one match
    pub async fn query_single(&self, base: &str, filter: &str) -> Result<T> {
        assert_single(self.query(base, filter).await?)
    }

    async fn collect(
        &self,
        conn: &mut dyn DirectoryConnection,
        request: &SearchRequest,
    ) -> Result<Vec<T>> {
        conn.search(request).await.map_err(protocol_failure)?;

        let mut entities = Vec::new();
        while let Some(record) = conn.next_entry().await.map_err(protocol_failure)? {
            entities.push(self.mapper.to_object(&record)?);
        }

        Ok(entities)
    }
}

/// Collapse any directory-side error into a protocol failure
fn protocol_failure(err: Error) -> Error {
    match err {
        Error::ProtocolFailure(_) => err,
        other => Error::ProtocolFailure(other.to_string()),
    }
}

fn not_allowed(operation: &str) -> Error {
    Error::MethodNotAllowed(format!(
        "{} has not been implemented for this LDAP DAO",
        operation
    ))
}

#[async_trait]
impl<T, M> GenericDao<T> for LdapDao<T, M>
where
    T: Entity + 'static,
    M: AttributeMapper<T> + 'static,
{
    async fn exists(&self, _id: &T::Id) -> Result<bool> {
        Err(not_allowed("Exists"))
    }

    async fn find_all(&self) -> Result<Vec<T>> {
        Err(not_allowed("FindAll"))
    }

    async fn find_by_id(&self, _id: &T::Id) -> Result<T> {
        Err(not_allowed("FindById"))
    }

    async fn save(&self, _entity: T) -> Result<T> {
        Err(not_allowed("Save"))
    }

    async fn update(&self, _entity: T) -> Result<T> {
        Err(not_allowed("Update"))
    }

    async fn delete(&self, _entity: &T) -> Result<()> {
        Err(not_allowed("Delete"))
    }

    async fn delete_by_id(&self, _id: &T::Id) -> Result<()> {
        Err(not_allowed("DeleteById"))
    }
}
