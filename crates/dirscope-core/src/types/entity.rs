//! Entity types

use serde::Serialize;
use std::fmt::Debug;

/// A domain object identified by a serializable key.
///
/// Entities are owned by the caller; the data-access layer only produces them.
pub trait Entity: Debug + Send + Sync {
    type Id: Serialize + Debug + Clone + Send + Sync;

    /// Key of this entity, if it has been assigned one
    fn id(&self) -> Option<&Self::Id>;
}
