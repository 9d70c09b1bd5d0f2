//! User record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted user document.
///
/// `id` and `timestamp` are assigned by [`Control::create`] and are empty on
/// templates. A `tag` of zero (or below) means "unset".
///
/// [`Control::create`]: crate::control::Control::create
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    /// Store-assigned unique identifier
    pub id: String,

    pub name: String,

    pub email: String,

    pub phone: String,

    /// Free-form numeric label, zero when unset
    pub tag: i64,

    /// Creation time, used for newest-first ordering
    pub timestamp: Option<DateTime<Utc>>,
}

impl Record {
    /// Create a template with just a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_tag(mut self, tag: i64) -> Self {
        self.tag = tag;
        self
    }

    /// Whether the tag counts as set
    pub fn has_tag(&self) -> bool {
        self.tag > 0
    }

    /// True when no filterable field is set, i.e. the template matches everything
    pub fn is_blank(&self) -> bool {
        self.id.is_empty()
            && self.name.is_empty()
            && self.email.is_empty()
            && self.phone.is_empty()
            && !self.has_tag()
    }

    /// True once the store has assigned identity and creation time
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty() && self.timestamp.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_template() {
        assert!(Record::default().is_blank());
        assert!(Record::default().with_tag(0).is_blank());
        assert!(Record::default().with_tag(-4).is_blank());
        assert!(!Record::default().with_tag(1).is_blank());
        assert!(!Record::named("bender").is_blank());
    }

    #[test]
    fn test_wire_field_names() {
        let record = Record::named("bender").with_email("bender@futurama").with_tag(666);
        let json = serde_json::to_value(&record).unwrap();

        for key in ["id", "name", "email", "phone", "tag", "timestamp"] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(json["tag"], 666);
        assert!(json["timestamp"].is_null());
    }
}
