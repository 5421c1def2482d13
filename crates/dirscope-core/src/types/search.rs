//! Search request types

use serde::{Deserialize, Serialize};

/// Depth of a directory search relative to its base entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// The base entry only
    Object,
    /// Immediate children of the base entry
    OneLevel,
    /// The base entry and all of its descendants
    #[default]
    Subtree,
}

/// A scoped directory search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Distinguished name of the search root
    pub base: String,
    /// Search filter expression, e.g. "(objectClass=person)"
    pub filter: String,
    pub scope: SearchScope,
    /// Attributes to return; empty means all user attributes
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl SearchRequest {
    /// Build a subtree search rooted at `base`
    pub fn subtree(base: impl Into<String>, filter: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            filter: filter.into(),
            scope: SearchScope::Subtree,
            attributes: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Vec<String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Attribute list as sent on the wire ("*" when none were requested)
    pub fn wire_attributes(&self) -> Vec<String> {
        if self.attributes.is_empty() {
            vec!["*".to_string()]
        } else {
            self.attributes.clone()
        }
    }
}
