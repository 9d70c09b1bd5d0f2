//! # File-backed Record Store
//!
//! The collection is mirrored in memory and every mutation is first appended
//! to `<data_dir>/<collection>.log`:
//!
//! ```text
//! <crc32 as 8 hex digits> <json operation>\n
//! ```
//!
//! An append is fsynced before the in-memory collection changes, so an
//! acknowledged write survives a crash. A failed write or fsync truncates the
//! log back to its last acknowledged length; if even that fails, the log
//! refuses every later mutation. Opening the store replays the log; any line
//! that fails its checksum or does not parse aborts the open.
//!
//! Log I/O runs on the blocking thread pool.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::checksum::{compute_checksum, verify_checksum};
use super::collection::Collection;
use super::errors::{StoreError, StoreResult};
use super::query::QuerySpec;
use super::RecordStore;
use crate::record::Record;

/// One logged mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum LogEntry {
    Insert { record: Record },
    Remove { id: String },
}

/// Append handle over the operation log
struct LogWriter {
    file: File,
    /// Length of the acknowledged prefix of the log
    len: u64,
    unusable: bool,
}

impl LogWriter {
    fn open(path: &Path) -> StoreResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| StoreError::io(format!("failed to open {}", path.display()), e))?;
        let len = file
            .metadata()
            .map_err(|e| StoreError::io(format!("failed to stat {}", path.display()), e))?
            .len();

        Ok(Self {
            file,
            len,
            unusable: false,
        })
    }

    fn append(&mut self, entry: &LogEntry) -> StoreResult<()> {
        if self.unusable {
            return Err(StoreError::LogUnusable);
        }

        let line = encode_line(entry)?;
        let written = self
            .file
            .write_all(line.as_bytes())
            .map_err(|e| StoreError::io("failed to append to operation log", e))
            .and_then(|()| {
                self.file
                    .sync_data()
                    .map_err(|e| StoreError::io("fsync failed on operation log", e))
            });

        match written {
            Ok(()) => {
                self.len += line.len() as u64;
                Ok(())
            }
            Err(err) => {
                self.rollback();
                Err(err)
            }
        }
    }

    /// Drop any bytes past the acknowledged prefix.
    fn rollback(&mut self) {
        let restored = self
            .file
            .set_len(self.len)
            .and_then(|()| self.file.sync_data());

        if let Err(e) = restored {
            tracing::error!(len = self.len, error = %e, "operation log rollback failed");
            self.unusable = true;
        }
    }
}

/// State shared with blocking log tasks
struct Shared {
    path: PathBuf,
    /// Held for the whole check-append-apply sequence of a mutation
    log: Mutex<LogWriter>,
    collection: RwLock<Collection>,
}

impl Shared {
    fn insert(&self, record: Record) -> StoreResult<()> {
        let mut log = self.log.lock().map_err(|_| StoreError::Poisoned)?;

        if self
            .collection
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .contains(&record.id)
        {
            return Err(StoreError::DuplicateId(record.id));
        }

        log.append(&LogEntry::Insert {
            record: record.clone(),
        })?;

        self.collection
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .insert(record)
    }

    fn remove(&self, id: String) -> StoreResult<()> {
        let mut log = self.log.lock().map_err(|_| StoreError::Poisoned)?;

        if !self
            .collection
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .contains(&id)
        {
            return Err(StoreError::NotFound(id));
        }

        log.append(&LogEntry::Remove { id: id.clone() })?;

        self.collection
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .remove(&id)
            .map(|_| ())
    }
}

/// Record store persisted as a checksummed operation log
pub struct FileStore {
    shared: Arc<Shared>,
}

impl FileStore {
    /// Open (or create) the log for `collection` under `data_dir` and replay it.
    pub fn open(data_dir: &Path, collection: &str) -> StoreResult<Self> {
        if !data_dir.exists() {
            fs::create_dir_all(data_dir).map_err(|e| {
                StoreError::io(
                    format!("failed to create data directory {}", data_dir.display()),
                    e,
                )
            })?;
        }

        let path = data_dir.join(format!("{}.log", collection));
        let replayed = Self::replay(&path)?;
        let log = LogWriter::open(&path)?;

        tracing::debug!(path = %path.display(), records = replayed.len(), "operation log replayed");

        Ok(Self {
            shared: Arc::new(Shared {
                path,
                log: Mutex::new(log),
                collection: RwLock::new(replayed),
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.shared.path
    }

    fn replay(path: &Path) -> StoreResult<Collection> {
        let mut collection = Collection::default();

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(collection),
            Err(e) => {
                return Err(StoreError::io(
                    format!("failed to read {}", path.display()),
                    e,
                ))
            }
        };

        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            if line.is_empty() {
                continue;
            }

            let entry = parse_line(line_no, line)?;
            let applied = match entry {
                LogEntry::Insert { record } => collection.insert(record),
                LogEntry::Remove { id } => collection.remove(&id).map(|_| ()),
            };
            applied.map_err(|e| StoreError::corruption(line_no, e.to_string()))?;
        }

        Ok(collection)
    }

    /// Run a log mutation on the blocking pool
    async fn mutate<F>(&self, f: F) -> StoreResult<()>
    where
        F: FnOnce(&Shared) -> StoreResult<()> + Send + 'static,
    {
        let shared = Arc::clone(&self.shared);
        tokio::task::spawn_blocking(move || f(shared.as_ref()))
            .await
            .map_err(|e| {
                StoreError::io(
                    "operation log task failed",
                    io::Error::new(io::ErrorKind::Other, e),
                )
            })?
    }
}

fn parse_line(line_no: usize, line: &str) -> StoreResult<LogEntry> {
    let (sum, body) = line
        .split_once(' ')
        .ok_or_else(|| StoreError::corruption(line_no, "missing checksum separator"))?;

    let expected = u32::from_str_radix(sum, 16)
        .map_err(|_| StoreError::corruption(line_no, format!("bad checksum field {:?}", sum)))?;

    if !verify_checksum(body.as_bytes(), expected) {
        return Err(StoreError::corruption(line_no, "checksum mismatch"));
    }

    serde_json::from_str(body).map_err(|e| StoreError::corruption(line_no, e.to_string()))
}

fn encode_line(entry: &LogEntry) -> StoreResult<String> {
    let body = serde_json::to_string(entry).map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(format!("{:08x} {}\n", compute_checksum(body.as_bytes()), body))
}

#[async_trait]
impl RecordStore for FileStore {
    async fn insert(&self, record: Record) -> StoreResult<()> {
        self.mutate(move |shared| shared.insert(record)).await
    }

    async fn count(&self, spec: &QuerySpec) -> StoreResult<usize> {
        let collection = self.shared.collection.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collection.count(spec))
    }

    async fn fetch(&self, spec: &QuerySpec, limit: Option<usize>) -> StoreResult<Vec<Record>> {
        let collection = self.shared.collection.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collection.fetch(spec, limit))
    }

    async fn remove_by_id(&self, id: &str) -> StoreResult<()> {
        let id = id.to_string();
        self.mutate(move |shared| shared.remove(id)).await
    }

    async fn len(&self) -> StoreResult<usize> {
        let collection = self.shared.collection.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collection.len())
    }
}
