//! In-memory record store

use std::sync::RwLock;

use async_trait::async_trait;

use super::collection::Collection;
use super::errors::{StoreError, StoreResult};
use super::query::QuerySpec;
use super::RecordStore;
use crate::record::Record;

/// Record store that lives for the duration of the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    collection: RwLock<Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, record: Record) -> StoreResult<()> {
        self.collection
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .insert(record)
    }

    async fn count(&self, spec: &QuerySpec) -> StoreResult<usize> {
        let collection = self.collection.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collection.count(spec))
    }

    async fn fetch(&self, spec: &QuerySpec, limit: Option<usize>) -> StoreResult<Vec<Record>> {
        let collection = self.collection.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collection.fetch(spec, limit))
    }

    async fn remove_by_id(&self, id: &str) -> StoreResult<()> {
        self.collection
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .remove(id)
            .map(|_| ())
    }

    async fn len(&self) -> StoreResult<usize> {
        let collection = self.collection.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collection.len())
    }
}
