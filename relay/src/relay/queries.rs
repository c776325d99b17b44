//! Read-only queries over the relayed headers.

use bitcoin::{BlockHash, Work};

use crate::error::{RelayError, RelayResult};
use crate::storage::HeaderStore;
use crate::types::StoredHeader;

use super::Relay;

impl<S: HeaderStore> Relay<S> {
    /// The genesis record, if the relay has been initialized.
    pub fn genesis(&self) -> RelayResult<Option<StoredHeader>> {
        match self.genesis {
            Some(hash) => Ok(self.store.get(&hash)?),
            None => Ok(None),
        }
    }

    /// Look up a stored header by hash.
    pub fn header(&self, hash: &BlockHash) -> RelayResult<Option<StoredHeader>> {
        Ok(self.store.get(hash)?)
    }

    /// All stored headers at `height`. More than one means the chain forked.
    pub fn headers_at(&self, height: u32) -> RelayResult<Vec<StoredHeader>> {
        Ok(self.store.get_at_height(height)?)
    }

    pub fn contains(&self, hash: &BlockHash) -> RelayResult<bool> {
        Ok(self.store.contains(hash)?)
    }

    /// Height of a stored block.
    pub fn height_of(&self, hash: &BlockHash) -> RelayResult<u32> {
        self.store.get(hash)?.map(|h| h.height).ok_or(RelayError::BlockNotFound(*hash))
    }

    /// Cumulative work from the genesis record up to `hash`.
    pub fn chain_work(&self, hash: &BlockHash) -> RelayResult<Work> {
        self.store.get(hash)?.map(|h| h.chain_work).ok_or(RelayError::BlockNotFound(*hash))
    }

    /// Greatest height of any stored header.
    ///
    /// This does not pick a best chain: with competing forks at the same
    /// height it only reports how far the relay has seen.
    pub fn max_height(&self) -> RelayResult<Option<u32>> {
        Ok(self.store.max_height()?)
    }

    /// Number of stored headers, genesis included.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
