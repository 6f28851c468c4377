//! Shared store wrapper
//!
//! A block store guarded by one exclusive lock, for callers that hand a
//! store to several threads (for example one store per cache shard).

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::Result;
use crate::frame::Block;
use crate::store::{BlockStore, StoreStats, VerifyReport};

/// Thread-safe handle around a single [`BlockStore`]
///
/// ## Concurrency:
/// - One `Mutex` covers puts AND gets: a get must not observe a range
///   while a put is overwriting it
/// - All methods use `&self`; share it with `Arc<SharedBlockStore>`
pub struct SharedBlockStore {
    inner: Mutex<BlockStore>,
}

impl SharedBlockStore {
    /// Create a shared store with a ring of `capacity` bytes
    pub fn new(capacity: usize) -> Result<Self> {
        BlockStore::new(capacity).map(Self::from)
    }

    /// Create a shared store from a full configuration
    pub fn with_config(config: Config) -> Result<Self> {
        BlockStore::with_config(config).map(Self::from)
    }

    /// Store a block (exclusive lock)
    pub fn put(&self, key: &[u8], value: &[u8], now: u64) -> Result<u64> {
        self.inner.lock().put(key, value, now)
    }

    /// Read a block (same exclusive lock)
    pub fn get(&self, sequence: u64) -> Result<Block> {
        self.inner.lock().get(sequence)
    }

    /// Read only the value of a block
    pub fn get_value(&self, sequence: u64) -> Result<Vec<u8>> {
        self.inner.lock().get_value(sequence)
    }

    pub fn contains(&self, sequence: u64) -> bool {
        self.inner.lock().contains(sequence)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        self.inner.lock().stats()
    }

    pub fn verify(&self) -> VerifyReport {
        self.inner.lock().verify()
    }

    /// Run several operations under one lock acquisition
    pub fn with_store<R>(&self, f: impl FnOnce(&mut BlockStore) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    /// Take the store back out of the wrapper
    pub fn into_inner(self) -> BlockStore {
        self.inner.into_inner()
    }
}

impl From<BlockStore> for SharedBlockStore {
    fn from(store: BlockStore) -> Self {
        Self {
            inner: Mutex::new(store),
        }
    }
}
