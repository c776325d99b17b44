//! Test data builders for creating block headers

use bitcoin::block::{Header, Version};
use bitcoin::consensus::serialize;
use bitcoin::hashes::Hash;
use bitcoin::{BlockHash, CompactTarget, TxMerkleNode};

/// Easiest target regtest accepts. About half of all hashes meet it.
pub const REGTEST_BITS: u32 = 0x207fffff;

/// Builder for creating test block headers
pub struct TestHeaderBuilder {
    version: Version,
    prev_blockhash: BlockHash,
    merkle_root: TxMerkleNode,
    time: u32,
    bits: CompactTarget,
    nonce: u32,
}

impl Default for TestHeaderBuilder {
    fn default() -> Self {
        Self {
            version: Version::from_consensus(0x20000000),
            prev_blockhash: BlockHash::all_zeros(),
            merkle_root: TxMerkleNode::all_zeros(),
            time: 1_700_000_000,
            bits: CompactTarget::from_consensus(REGTEST_BITS),
            nonce: 0,
        }
    }
}

impl TestHeaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prev_blockhash(mut self, hash: BlockHash) -> Self {
        self.prev_blockhash = hash;
        self
    }

    pub fn with_merkle_root(mut self, root: TxMerkleNode) -> Self {
        self.merkle_root = root;
        self
    }

    pub fn with_time(mut self, time: u32) -> Self {
        self.time = time;
        self
    }

    pub fn with_bits(mut self, bits: u32) -> Self {
        self.bits = CompactTarget::from_consensus(bits);
        self
    }

    pub fn with_nonce(mut self, nonce: u32) -> Self {
        self.nonce = nonce;
        self
    }

    /// Build the header as configured, without touching the nonce.
    pub fn build(self) -> Header {
        Header {
            version: self.version,
            prev_blockhash: self.prev_blockhash,
            merkle_root: self.merkle_root,
            time: self.time,
            bits: self.bits,
            nonce: self.nonce,
        }
    }

    /// Build a header whose hash meets its own target, searching nonces
    /// upward from the configured one.
    pub fn build_with_valid_pow(self) -> Header {
        let mut header = self.build();
        while !header.target().is_met_by(header.block_hash()) {
            header.nonce = header.nonce.wrapping_add(1);
        }
        header
    }

    /// Build a header whose hash does not meet its own target.
    pub fn build_with_invalid_pow(self) -> Header {
        let mut header = self.build();
        while header.target().is_met_by(header.block_hash()) {
            header.nonce = header.nonce.wrapping_add(1);
        }
        header
    }
}

/// Mine `count` headers extending `parent`, each with valid proof of work.
pub fn mine_chain(parent: BlockHash, count: usize) -> Vec<Header> {
    let mut headers = Vec::with_capacity(count);
    let mut prev = parent;
    for i in 0..count {
        let header = TestHeaderBuilder::new()
            .with_prev_blockhash(prev)
            .with_time(1_700_000_000 + i as u32 * 600)
            .build_with_valid_pow();
        prev = header.block_hash();
        headers.push(header);
    }
    headers
}

/// Consensus-encode a header.
pub fn header_bytes(header: &Header) -> Vec<u8> {
    serialize(header)
}
