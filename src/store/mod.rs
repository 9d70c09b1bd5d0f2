//! # Record Store
//!
//! The document-store client contract consumed by [`Control`], and the two
//! collections shipped with the service.
//!
//! - [`MemoryStore`] keeps the collection in process.
//! - [`FileStore`] adds an append-only, checksummed operation log that is
//!   replayed on open.
//!
//! Store calls are the only points where a request may block on I/O. The
//! store makes each individual insert, count, fetch and remove safe under
//! concurrency; nothing here spans more than one call.
//!
//! [`Control`]: crate::control::Control

mod checksum;
mod collection;
mod errors;
mod file;
mod filter;
mod memory;
mod query;

pub use checksum::compute_checksum;
pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use filter::{Filter, SortOrder};
pub use memory::MemoryStore;
pub use query::{Query, QuerySpec};

use async_trait::async_trait;

use crate::record::Record;

/// Persistent collection of user records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a fully formed record. Fails if the id is already present.
    async fn insert(&self, record: Record) -> StoreResult<()>;

    /// Number of records matching the query filter
    async fn count(&self, spec: &QuerySpec) -> StoreResult<usize>;

    /// Records matching the query, in query order, at most `limit` of them
    async fn fetch(&self, spec: &QuerySpec, limit: Option<usize>) -> StoreResult<Vec<Record>>;

    /// Remove the record with the given id
    async fn remove_by_id(&self, id: &str) -> StoreResult<()>;

    /// Total number of records in the collection
    async fn len(&self) -> StoreResult<usize>;
}

impl<'s> dyn RecordStore + 's {
    /// Start a query over records matching `filter`
    pub fn find(&self, filter: Filter) -> Query<'_> {
        Query::new(self, filter)
    }
}
