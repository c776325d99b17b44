//! In-memory storage implementation.

use std::collections::{BTreeMap, HashMap};

use bitcoin::BlockHash;

use crate::error::{StorageError, StorageResult};
use crate::storage::HeaderStore;
use crate::types::StoredHeader;

/// In-memory header store.
#[derive(Debug, Default)]
pub struct MemoryHeaderStore {
    headers: HashMap<BlockHash, StoredHeader>,
    // Height index; BTreeMap keeps the greatest height at the end
    height_index: BTreeMap<u32, Vec<BlockHash>>,
}

impl MemoryHeaderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HeaderStore for MemoryHeaderStore {
    fn insert(&mut self, header: StoredHeader) -> StorageResult<()> {
        let hash = header.block_hash();
        if self.headers.contains_key(&hash) {
            return Err(StorageError::AlreadyExists(hash));
        }

        self.height_index.entry(header.height).or_default().push(hash);
        self.headers.insert(hash, header);

        tracing::trace!("Stored header {} at height {}", hash, header.height);
        Ok(())
    }

    fn get(&self, hash: &BlockHash) -> StorageResult<Option<StoredHeader>> {
        Ok(self.headers.get(hash).copied())
    }

    fn get_at_height(&self, height: u32) -> StorageResult<Vec<StoredHeader>> {
        let Some(hashes) = self.height_index.get(&height) else {
            return Ok(Vec::new());
        };

        hashes
            .iter()
            .map(|hash| {
                self.headers.get(hash).copied().ok_or_else(|| {
                    StorageError::InconsistentState(format!(
                        "height index references missing header {}",
                        hash
                    ))
                })
            })
            .collect()
    }

    fn max_height(&self) -> StorageResult<Option<u32>> {
        Ok(self.height_index.keys().next_back().copied())
    }

    fn len(&self) -> usize {
        self.headers.len()
    }
}
