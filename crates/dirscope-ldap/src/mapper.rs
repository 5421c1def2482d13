//! Attribute mapping

use dirscope_core::types::{DirectoryRecord, Entity};
use dirscope_core::Result;

/// Converts directory records to entities of type `T`.
///
/// One implementation per entity type, injected into
/// [`LdapDao`](crate::LdapDao). `to_object` must tolerate missing optional
/// attributes; a missing required attribute is reported as
/// [`Error::Mapping`](dirscope_core::Error::Mapping).
pub trait AttributeMapper<T: Entity>: Send + Sync {
    /// Build an entity from one search hit
    fn to_object(&self, record: &DirectoryRecord) -> Result<T>;

    /// Record form of an entity.
    ///
    /// Not used by the read path.
    fn to_entity(&self, entity: &T) -> Vec<DirectoryRecord>;

    /// Attributes to request from the directory; empty requests all of them
    fn attributes(&self) -> Vec<String> {
        Vec::new()
    }
}
