//! Directory record types
//!
//! A `DirectoryRecord` is one search hit: the entry's distinguished name plus
//! its attributes in the order the directory returned them. Attribute names
//! are matched ASCII case-insensitively, as LDAP attribute descriptions are.

use serde::{Deserialize, Serialize};

/// A named, multi-valued directory attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub values: Vec<String>,
}

/// Attributes of a single directory entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    /// Distinguished name of the entry
    pub dn: String,
    attributes: Vec<Attribute>,
}

impl DirectoryRecord {
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: Vec::new(),
        }
    }

    /// Builder form of [`DirectoryRecord::push`]
    pub fn with_attribute<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.push(name, values);
        self
    }

    /// Append values to an attribute, creating it if absent.
    ///
    /// Values for an existing attribute keep the attribute's original position.
    pub fn push<I, V>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.into();
        let values = values.into_iter().map(Into::into);

        match self.position(&name) {
            Some(idx) => self.attributes[idx].values.extend(values),
            None => self.attributes.push(Attribute {
                name,
                values: values.collect(),
            }),
        }
    }

    /// All values of an attribute
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.position(name)
            .map(|idx| self.attributes[idx].values.as_slice())
    }

    /// First value of an attribute
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// First value of an attribute that must be present
    pub fn required(&self, name: &str) -> crate::Result<&str> {
        self.first(name).ok_or_else(|| {
            crate::Error::Mapping(format!(
                "entry '{}' is missing required attribute '{}'",
                self.dn, name
            ))
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DirectoryRecord {
        DirectoryRecord::new("uid=alice,ou=users,dc=example,dc=com")
            .with_attribute("uid", ["alice"])
            .with_attribute("mail", ["alice@example.com"])
            .with_attribute("memberOf", ["cn=admins", "cn=dev"])
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let record = sample();
        assert_eq!(record.first("UID"), Some("alice"));
        assert_eq!(record.get("memberof").map(|v| v.len()), Some(2));
        assert!(record.contains("Mail"));
        assert!(!record.contains("cn"));
    }

    #[test]
    fn test_attribute_order_is_preserved() {
        let mut record = sample();
        record.push("MAIL", ["alice@corp.example.com"]);

        let names: Vec<_> = record.attributes().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["uid", "mail", "memberOf"]);
        assert_eq!(
            record.get("mail").unwrap(),
            &["alice@example.com".to_string(), "alice@corp.example.com".to_string()]
        );
    }

    #[test]
    fn test_required_attribute_missing() {
        let record = sample();
        assert_eq!(record.required("uid").unwrap(), "alice");

        let err = record.required("displayName").unwrap_err();
        assert!(matches!(err, crate::Error::Mapping(_)));
        assert!(err.to_string().contains("displayName"));
    }
}
