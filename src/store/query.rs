//! Query handles over a record store

use super::errors::{StoreError, StoreResult};
use super::filter::{Filter, SortOrder};
use super::RecordStore;
use crate::record::Record;

/// Filter plus ordering, as handed to a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub filter: Filter,
    pub order: SortOrder,
}

impl QuerySpec {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            order: SortOrder::Natural,
        }
    }
}

/// A pending query bound to a store
pub struct Query<'a> {
    store: &'a dyn RecordStore,
    spec: QuerySpec,
}

impl<'a> Query<'a> {
    pub fn new(store: &'a dyn RecordStore, filter: Filter) -> Self {
        Self {
            store,
            spec: QuerySpec::new(filter),
        }
    }

    /// Order results newest first
    pub fn sort_by_created_at_descending(mut self) -> Self {
        self.spec.order = SortOrder::CreatedAtDescending;
        self
    }

    pub async fn count(&self) -> StoreResult<usize> {
        self.store.count(&self.spec).await
    }

    pub async fn all(&self) -> StoreResult<Vec<Record>> {
        self.store.fetch(&self.spec, None).await
    }

    /// First record in query order
    pub async fn one(&self) -> StoreResult<Record> {
        self.store
            .fetch(&self.spec, Some(1))
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::NoMatch)
    }
}
