//! # Query Filters
//!
//! A template selects exactly one field to filter on, by fixed priority:
//! `id`, then `name`, `email`, `phone` and finally `tag` (only when > 0).
//! A template with none of them set matches every record.

use std::fmt;

use crate::record::Record;

/// Single-field search predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    Id(String),
    Name(String),
    Email(String),
    Phone(String),
    Tag(i64),
}

impl Filter {
    /// Build the filter for a template using the first non-empty field
    pub fn from_template(template: &Record) -> Self {
        if !template.id.is_empty() {
            Filter::Id(template.id.clone())
        } else if !template.name.is_empty() {
            Filter::Name(template.name.clone())
        } else if !template.email.is_empty() {
            Filter::Email(template.email.clone())
        } else if !template.phone.is_empty() {
            Filter::Phone(template.phone.clone())
        } else if template.has_tag() {
            Filter::Tag(template.tag)
        } else {
            Filter::All
        }
    }

    /// Check whether a record satisfies this filter
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Filter::All => true,
            Filter::Id(id) => record.id == *id,
            Filter::Name(name) => record.name == *name,
            Filter::Email(email) => record.email == *email,
            Filter::Phone(phone) => record.phone == *phone,
            Filter::Tag(tag) => record.tag == *tag,
        }
    }

    /// Name of the field this filter inspects
    pub fn field(&self) -> &'static str {
        match self {
            Filter::All => "*",
            Filter::Id(_) => "id",
            Filter::Name(_) => "name",
            Filter::Email(_) => "email",
            Filter::Phone(_) => "phone",
            Filter::Tag(_) => "tag",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => write!(f, "*"),
            Filter::Tag(tag) => write!(f, "tag={}", tag),
            Filter::Id(v) | Filter::Name(v) | Filter::Email(v) | Filter::Phone(v) => {
                write!(f, "{}={:?}", self.field(), v)
            }
        }
    }
}

/// Result ordering for a query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Insertion order
    #[default]
    Natural,
    /// Newest `timestamp` first; ties go to the later insert
    CreatedAtDescending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let mut template = Record::named("bender")
            .with_email("bender@futurama")
            .with_phone("555-0100")
            .with_tag(666);
        template.id = "abc".to_string();

        assert_eq!(Filter::from_template(&template), Filter::Id("abc".to_string()));

        template.id.clear();
        assert_eq!(Filter::from_template(&template), Filter::Name("bender".to_string()));

        template.name.clear();
        assert_eq!(
            Filter::from_template(&template),
            Filter::Email("bender@futurama".to_string())
        );

        template.email.clear();
        assert_eq!(Filter::from_template(&template), Filter::Phone("555-0100".to_string()));

        template.phone.clear();
        assert_eq!(Filter::from_template(&template), Filter::Tag(666));

        template.tag = 0;
        assert_eq!(Filter::from_template(&template), Filter::All);
    }

    #[test]
    fn test_non_positive_tag_is_unset() {
        for tag in [0, -1, i64::MIN] {
            let template = Record::default().with_tag(tag);
            assert_eq!(Filter::from_template(&template), Filter::All);
        }
    }

    #[test]
    fn test_matches() {
        let record = Record::named("leela").with_tag(1);
        assert!(Filter::All.matches(&record));
        assert!(Filter::Name("leela".to_string()).matches(&record));
        assert!(!Filter::Name("fry".to_string()).matches(&record));
        assert!(Filter::Tag(1).matches(&record));
        assert!(!Filter::Email(String::new()).matches(&Record::named("x").with_email("a@b")));
    }

    #[test]
    fn test_display() {
        assert_eq!(Filter::All.to_string(), "*");
        assert_eq!(Filter::Tag(3).to_string(), "tag=3");
        assert_eq!(Filter::Name("fry".to_string()).to_string(), "name=\"fry\"");
    }
}
