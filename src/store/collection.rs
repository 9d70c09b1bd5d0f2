//! In-process collection shared by the memory and file stores

use std::cmp::Reverse;

use super::errors::{StoreError, StoreResult};
use super::filter::SortOrder;
use super::query::QuerySpec;
use crate::record::Record;

/// Records in insertion order
#[derive(Debug, Default)]
pub(crate) struct Collection {
    records: Vec<Record>,
}

impl Collection {
    pub(crate) fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub(crate) fn insert(&mut self, record: Record) -> StoreResult<()> {
        if self.contains(&record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        self.records.push(record);
        Ok(())
    }

    pub(crate) fn remove(&mut self, id: &str) -> StoreResult<Record> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(self.records.remove(pos))
    }

    pub(crate) fn count(&self, spec: &QuerySpec) -> usize {
        self.records.iter().filter(|r| spec.filter.matches(r)).count()
    }

    pub(crate) fn fetch(&self, spec: &QuerySpec, limit: Option<usize>) -> Vec<Record> {
        let matched = self.records.iter().filter(|r| spec.filter.matches(r));

        let mut out: Vec<Record> = match spec.order {
            SortOrder::Natural => matched.cloned().collect(),
            SortOrder::CreatedAtDescending => {
                // Reverse first so the stable sort keeps later inserts ahead on ties.
                let mut newest: Vec<Record> = matched.rev().cloned().collect();
                newest.sort_by_key(|r| Reverse(r.timestamp));
                newest
            }
        };

        if let Some(limit) = limit {
            out.truncate(limit);
        }
        out
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Filter;
    use chrono::{Duration, Utc};

    fn stamped(id: &str, name: &str, offset_secs: i64) -> Record {
        Record {
            id: id.to_string(),
            name: name.to_string(),
            timestamp: Some(Utc::now() + Duration::seconds(offset_secs)),
            ..Default::default()
        }
    }

    #[test]
    fn test_newest_first() {
        let mut coll = Collection::default();
        coll.insert(stamped("a", "x", 0)).unwrap();
        coll.insert(stamped("b", "x", 10)).unwrap();
        coll.insert(stamped("c", "x", 5)).unwrap();

        let spec = QuerySpec {
            filter: Filter::All,
            order: SortOrder::CreatedAtDescending,
        };
        let ids: Vec<_> = coll.fetch(&spec, None).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        let first = coll.fetch(&spec, Some(1));
        assert_eq!(first[0].id, "b");
    }

    #[test]
    fn test_timestamp_ties_prefer_later_insert() {
        let now = Utc::now();
        let mut coll = Collection::default();
        for id in ["a", "b", "c"] {
            let mut r = Record::named("x");
            r.id = id.to_string();
            r.timestamp = Some(now);
            coll.insert(r).unwrap();
        }

        let spec = QuerySpec {
            filter: Filter::All,
            order: SortOrder::CreatedAtDescending,
        };
        let ids: Vec<_> = coll.fetch(&spec, None).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_duplicate_and_missing_ids() {
        let mut coll = Collection::default();
        coll.insert(stamped("a", "x", 0)).unwrap();
        assert!(matches!(
            coll.insert(stamped("a", "y", 0)),
            Err(StoreError::DuplicateId(id)) if id == "a"
        ));
        assert!(matches!(coll.remove("zzz"), Err(StoreError::NotFound(_))));
        assert_eq!(coll.remove("a").unwrap().name, "x");
        assert_eq!(coll.len(), 0);
    }
}
