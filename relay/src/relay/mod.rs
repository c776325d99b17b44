//! The header relay: a trusted genesis record plus the headers that extend it.

mod queries;

use bitcoin::{BlockHash, TxMerkleNode, Txid};

use crate::config::RelayConfig;
use crate::error::{RelayError, RelayResult};
use crate::merkle;
use crate::storage::{HeaderStore, MemoryHeaderStore};
use crate::types::{
    checked_add_work, decode_hex, Accepted, HashedBlockHeader, RawHeader, StoredHeader,
};
use crate::validation::{BlockHeaderValidator, HeaderContext, Validator};

/// Stores block headers of a relayed chain and answers inclusion queries.
///
/// Every operation either fully applies or returns an error with the
/// store left untouched.
pub struct Relay<S: HeaderStore = MemoryHeaderStore> {
    config: RelayConfig,
    store: S,
    validator: BlockHeaderValidator,
    genesis: Option<BlockHash>,
}

impl Relay<MemoryHeaderStore> {
    /// Create a relay backed by in-memory storage.
    pub fn new(config: RelayConfig) -> Self {
        Self::with_store(config, MemoryHeaderStore::new())
    }
}

impl<S: HeaderStore> Relay<S> {
    /// Create a relay over the given store.
    pub fn with_store(config: RelayConfig, store: S) -> Self {
        let validator = BlockHeaderValidator::new(
            config.validation_mode,
            config.pow_limit(),
            config.retarget_interval,
        );
        Self {
            config,
            store,
            validator,
            genesis: None,
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.genesis.is_some()
    }

    /// Store the trusted genesis header at `height`.
    ///
    /// The genesis header is not checked for proof of work, but its target
    /// must be non-zero and within the network limit. This can only be done
    /// once per relay.
    pub fn initialize(&mut self, header: &[u8], height: u32) -> RelayResult<BlockHash> {
        if self.genesis.is_some() {
            return Err(RelayError::GenesisSet);
        }

        let raw = RawHeader::try_from(header)?;
        let hashed = HashedBlockHeader::from(raw.decode());
        let hash = *hashed.hash();
        self.validator.check_target(hashed.header())?;

        self.store.insert(StoredHeader {
            chain_work: hashed.header().work(),
            header: hashed,
            height,
        })?;
        self.genesis = Some(hash);

        tracing::info!("Relay initialized with genesis {} at height {}", hash, height);
        Ok(hash)
    }

    /// Hex variant of [`Relay::initialize`].
    pub fn initialize_hex(&mut self, header: &str, height: u32) -> RelayResult<BlockHash> {
        let raw = RawHeader::from_hex(header)?;
        self.initialize(raw.as_bytes(), height)
    }

    /// Submit a header claimed to sit at `claimed_height`.
    ///
    /// The header must be exactly 80 bytes, extend a stored header, sit one
    /// above it, and pass the checks of the configured validation mode.
    pub fn submit(&mut self, header: &[u8], claimed_height: u32) -> RelayResult<Accepted> {
        if self.genesis.is_none() {
            return Err(RelayError::NotInitialized);
        }

        let raw = RawHeader::try_from(header).inspect_err(|_| {
            tracing::warn!("Rejected header of {} bytes", header.len());
        })?;
        let hashed = HashedBlockHeader::from(raw.decode());
        let hash = *hashed.hash();

        if self.store.contains(&hash)? {
            return Err(RelayError::DuplicateBlock(hash));
        }

        let prev = hashed.header().prev_blockhash;
        let parent = self.store.get(&prev)?.ok_or(RelayError::PrevBlock(prev))?;

        let expected = parent.height.checked_add(1).ok_or(RelayError::HeightOverflow(prev))?;
        if claimed_height != expected {
            return Err(RelayError::InvalidHeight {
                claimed: claimed_height,
                expected,
            });
        }

        self.validator.validate(&HeaderContext {
            header: &hashed,
            parent: &parent,
            height: expected,
        })?;

        let chain_work = checked_add_work(parent.chain_work, hashed.header().work())
            .ok_or(RelayError::ChainWorkOverflow(hash))?;

        self.store.insert(StoredHeader {
            chain_work,
            header: hashed,
            height: expected,
        })?;

        tracing::debug!("Accepted header {} at height {}", hash, expected);
        Ok(Accepted {
            block_hash: hash,
            height: expected,
        })
    }

    /// Hex variant of [`Relay::submit`].
    pub fn submit_hex(&mut self, header: &str, claimed_height: u32) -> RelayResult<Accepted> {
        self.submit(&decode_hex(header)?, claimed_height)
    }

    /// Check that `txid` at position `index` is committed to by the merkle
    /// root of stored block `block_hash`.
    pub fn verify_inclusion(
        &self,
        txid: Txid,
        block_hash: &BlockHash,
        index: u32,
        proof: &[TxMerkleNode],
    ) -> RelayResult<()> {
        let stored = self.store.get(block_hash)?.ok_or(RelayError::BlockNotFound(*block_hash))?;
        let root = merkle::compute_root(txid, index, proof)?;

        if root != stored.header.header().merkle_root {
            tracing::debug!("Merkle proof for {} does not match block {}", txid, block_hash);
            return Err(RelayError::InvalidMerkleProof(format!(
                "computed root {} does not match block {}",
                root, block_hash
            )));
        }
        Ok(())
    }
}
