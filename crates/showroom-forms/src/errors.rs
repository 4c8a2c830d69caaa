//! Per-field error messages.
//!
//! An [`ErrorMap`] maps an [`ErrorKey`] to the message shown next to that
//! field. A missing key means the field is currently valid. The reserved
//! [`ErrorKey::General`] key holds submission-level failures.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::fields::FieldName;

/// Key of an entry in an [`ErrorMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKey {
    Name,
    Phone,
    Email,
    Product,
    Message,
    /// Submission-level failure not tied to any input.
    General,
}

impl ErrorKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Product => "product",
            Self::Message => "message",
            Self::General => "general",
        }
    }
}

impl From<FieldName> for ErrorKey {
    fn from(field: FieldName) -> Self {
        match field {
            FieldName::Name => Self::Name,
            FieldName::Phone => Self::Phone,
            FieldName::Email => Self::Email,
            FieldName::Product => Self::Product,
            FieldName::Message => Self::Message,
        }
    }
}

/// Error messages keyed by field.
///
/// Serializes as a flat JSON object such as
/// `{"email": "Email is invalid.", "general": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap {
    entries: BTreeMap<ErrorKey, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the message for `key`, if that key currently has an error.
    pub fn get(&self, key: impl Into<ErrorKey>) -> Option<&str> {
        self.entries.get(&key.into()).map(String::as_str)
    }

    /// Returns `true` if `key` currently has an error.
    pub fn contains(&self, key: impl Into<ErrorKey>) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// Sets the message for `key`, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<ErrorKey>, message: impl Into<String>) {
        self.entries.insert(key.into(), message.into());
    }

    /// Removes the message for `key`, returning it if there was one.
    pub fn remove(&mut self, key: impl Into<ErrorKey>) -> Option<String> {
        self.entries.remove(&key.into())
    }

    /// Returns the submission-level failure message, if any.
    pub fn general(&self) -> Option<&str> {
        self.get(ErrorKey::General)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, ErrorKey, String> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ErrorMap {
    type Item = (&'a ErrorKey, &'a String);
    type IntoIter = btree_map::Iter<'a, ErrorKey, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let mut errors = ErrorMap::new();
        assert!(errors.is_empty());
        errors.insert(FieldName::Email, "Email is invalid.");
        assert_eq!(errors.get(FieldName::Email), Some("Email is invalid."));
        assert!(errors.contains(ErrorKey::Email));
        assert_eq!(errors.len(), 1);

        assert_eq!(
            errors.remove(FieldName::Email).as_deref(),
            Some("Email is invalid.")
        );
        assert!(errors.is_empty());
        assert_eq!(errors.remove(FieldName::Email), None);
    }

    #[test]
    fn test_insert_replaces() {
        let mut errors = ErrorMap::new();
        errors.insert(FieldName::Phone, "first");
        errors.insert(FieldName::Phone, "second");
        assert_eq!(errors.get(FieldName::Phone), Some("second"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_general_key() {
        let mut errors = ErrorMap::new();
        assert_eq!(errors.general(), None);
        errors.insert(ErrorKey::General, "Failed to send. Try again later.");
        assert_eq!(errors.general(), Some("Failed to send. Try again later."));
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let mut errors = ErrorMap::new();
        errors.insert(FieldName::Name, "Name is required.");
        errors.insert(ErrorKey::General, "oops");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Name is required.", "general": "oops"})
        );
    }

    #[test]
    fn test_key_names_match_field_names() {
        for field in FieldName::ALL {
            assert_eq!(ErrorKey::from(field).as_str(), field.as_str());
        }
        assert_eq!(ErrorKey::General.as_str(), "general");
    }
}
