//! Storage abstraction for relayed headers.

mod memory;

pub use memory::MemoryHeaderStore;

use bitcoin::BlockHash;

use crate::error::StorageResult;
use crate::types::StoredHeader;

/// Storage for headers accepted by the relay.
///
/// Implementations index headers by hash and by height. Several headers
/// may share a height when the relayed chain forks.
pub trait HeaderStore: Send + Sync {
    /// Insert a header. Fails with `AlreadyExists` if the hash is stored.
    fn insert(&mut self, header: StoredHeader) -> StorageResult<()>;

    /// Look up a header by hash.
    fn get(&self, hash: &BlockHash) -> StorageResult<Option<StoredHeader>>;

    /// All headers stored at `height`, in insertion order.
    fn get_at_height(&self, height: u32) -> StorageResult<Vec<StoredHeader>>;

    /// Greatest height of any stored header.
    fn max_height(&self) -> StorageResult<Option<u32>>;

    /// Number of stored headers.
    fn len(&self) -> usize;

    fn contains(&self, hash: &BlockHash) -> StorageResult<bool> {
        Ok(self.get(hash)?.is_some())
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
