//! Common type definitions for the header relay.

use std::fmt;
use std::str::FromStr;

use bitcoin::block::{Header as BlockHeader, Version};
use bitcoin::consensus::serialize;
use bitcoin::hashes::Hash;
use bitcoin::pow::Work;
use bitcoin::{BlockHash, CompactTarget, TxMerkleNode};
use serde::{Deserialize, Serialize};

use crate::error::{RelayError, RelayResult};

/// Size in bytes of a consensus-encoded Bitcoin block header.
pub const HEADER_SIZE: usize = 80;

/// Decode a hex string, with or without a `0x` prefix.
pub fn decode_hex(s: &str) -> RelayResult<Vec<u8>> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|e| RelayError::InvalidHex(e.to_string()))
}

/// A block header that passed the length check.
///
/// Every field of a Bitcoin header is fixed width, so any [`HEADER_SIZE`]
/// bytes decode to a header.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawHeader([u8; HEADER_SIZE]);

impl RawHeader {
    /// Parse a hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> RelayResult<Self> {
        Self::try_from(decode_hex(s)?.as_slice())
    }

    /// Decode the consensus fields of the header.
    pub fn decode(&self) -> BlockHeader {
        BlockHeader {
            version: Version::from_consensus(i32::from_le_bytes(self.field(0))),
            prev_blockhash: BlockHash::from_byte_array(self.field(4)),
            merkle_root: TxMerkleNode::from_byte_array(self.field(36)),
            time: u32::from_le_bytes(self.field(68)),
            bits: CompactTarget::from_consensus(u32::from_le_bytes(self.field(72))),
            nonce: u32::from_le_bytes(self.field(76)),
        }
    }

    fn field<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.0[offset..offset + N]);
        out
    }

    pub fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.0
    }
}

impl TryFrom<&[u8]> for RawHeader {
    type Error = RelayError;

    fn try_from(bytes: &[u8]) -> RelayResult<Self> {
        let array: [u8; HEADER_SIZE] =
            bytes.try_into().map_err(|_| RelayError::InvalidHeader {
                expected: HEADER_SIZE,
                actual: bytes.len(),
            })?;
        Ok(Self(array))
    }
}

impl From<&BlockHeader> for RawHeader {
    fn from(header: &BlockHeader) -> Self {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes.copy_from_slice(&serialize(header));
        Self(bytes)
    }
}

impl fmt::Debug for RawHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawHeader({})", hex::encode(self.0))
    }
}

/// A block header paired with its hash, so the hash is computed once.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HashedBlockHeader {
    header: BlockHeader,
    hash: BlockHash,
}

impl HashedBlockHeader {
    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn hash(&self) -> &BlockHash {
        &self.hash
    }
}

impl From<BlockHeader> for HashedBlockHeader {
    fn from(header: BlockHeader) -> Self {
        Self {
            hash: header.block_hash(),
            header,
        }
    }
}

impl fmt::Debug for HashedBlockHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedBlockHeader")
            .field("hash", &self.hash)
            .field("prev_blockhash", &self.header.prev_blockhash)
            .finish()
    }
}

/// A header as kept by the relay's store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredHeader {
    /// The decoded header and its hash.
    pub header: HashedBlockHeader,
    /// Height of the block on its chain.
    pub height: u32,
    /// Cumulative proof of work from the genesis record up to this header.
    pub chain_work: Work,
}

impl StoredHeader {
    pub fn block_hash(&self) -> BlockHash {
        *self.header.hash()
    }
}

/// Add two amounts of work, `None` if the sum does not fit in 256 bits.
pub fn checked_add_work(a: Work, b: Work) -> Option<Work> {
    let (a, b) = (a.to_le_bytes(), b.to_le_bytes());
    let mut sum = [0u8; 32];
    let mut carry = 0u16;
    for i in 0..32 {
        let limb = u16::from(a[i]) + u16::from(b[i]) + carry;
        sum[i] = limb as u8;
        carry = limb >> 8;
    }
    (carry == 0).then(|| Work::from_le_bytes(sum))
}

/// Outcome of a successful header submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepted {
    pub block_hash: BlockHash,
    pub height: u32,
}

/// Validation mode for submitted headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Structural checks only: size, encoding, parent linkage and height.
    None,

    /// Structural checks plus proof of work against the header's own target.
    Basic,

    /// Basic checks plus difficulty continuity between retarget boundaries.
    #[default]
    Full,
}

impl ValidationMode {
    pub fn checks_pow(self) -> bool {
        matches!(self, ValidationMode::Basic | ValidationMode::Full)
    }

    pub fn checks_difficulty(self) -> bool {
        self == ValidationMode::Full
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(ValidationMode::None),
            "basic" => Ok(ValidationMode::Basic),
            "full" => Ok(ValidationMode::Full),
            other => Err(format!("unknown validation mode '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK_1: &str = "010000006fe28c0ab6f1b372c1a6a246ae63f74f931e8365e15a089c68d6190000000000982051fd1e4ba744bbbe680e1fee14677ba1a3c3540bf7b1cdb606e857233e0e61bc6649ffff001d01e36299";

    #[test]
    fn test_raw_header_rejects_short_input() {
        let bytes = hex::decode(BLOCK_1).unwrap();
        let result = RawHeader::try_from(&bytes[..28]);
        assert_eq!(
            result,
            Err(RelayError::InvalidHeader {
                expected: HEADER_SIZE,
                actual: 28,
            })
        );
    }

    #[test]
    fn test_raw_header_rejects_long_input() {
        let mut bytes = hex::decode(BLOCK_1).unwrap();
        bytes.push(0);
        assert!(matches!(
            RawHeader::try_from(bytes.as_slice()),
            Err(RelayError::InvalidHeader {
                actual: 81,
                ..
            })
        ));
    }

    #[test]
    fn test_raw_header_from_hex_accepts_prefix() {
        let plain = RawHeader::from_hex(BLOCK_1).unwrap();
        let prefixed = RawHeader::from_hex(&format!("0x{}", BLOCK_1)).unwrap();
        assert_eq!(plain, prefixed);
    }

    #[test]
    fn test_raw_header_from_bad_hex() {
        let err = RawHeader::from_hex("zz").unwrap_err();
        assert!(matches!(err, RelayError::InvalidHex(_)));
        assert_eq!(err.code(), "ERR_INVALID_HEADER");
    }

    #[test]
    fn test_decode_block_one() {
        let header = RawHeader::from_hex(BLOCK_1).unwrap().decode();
        let hashed = HashedBlockHeader::from(header);
        assert_eq!(
            hashed.hash().to_string(),
            "00000000839a8e6886ab5951d76f411475428afc90947ee320161bbf18eb6048"
        );
        assert_eq!(
            header.prev_blockhash.to_string(),
            "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"
        );
        assert_eq!(header.bits.to_consensus(), 0x1d00ffff);
        assert_ne!(header.merkle_root, bitcoin::TxMerkleNode::all_zeros());
    }

    #[test]
    fn test_raw_header_reencodes() {
        let raw = RawHeader::from_hex(BLOCK_1).unwrap();
        let header = raw.decode();
        assert_eq!(RawHeader::from(&header), raw);
        assert_eq!(header, bitcoin::consensus::deserialize::<BlockHeader>(raw.as_bytes()).unwrap());
    }

    #[test]
    fn test_decode_hex_helper() {
        assert_eq!(decode_hex("0x00ff").unwrap(), vec![0x00, 0xff]);
        assert_eq!(decode_hex("00ff").unwrap(), vec![0x00, 0xff]);
        assert!(matches!(decode_hex("0x0"), Err(RelayError::InvalidHex(_))));
    }

    #[test]
    fn test_checked_add_work() {
        let one = Work::from_le_bytes({
            let mut b = [0u8; 32];
            b[0] = 1;
            b
        });
        let carry = Work::from_le_bytes({
            let mut b = [0u8; 32];
            b[0] = 0xff;
            b
        });
        let sum = checked_add_work(one, carry).unwrap();
        assert_eq!(sum.to_le_bytes()[..2], [0x00, 0x01]);

        let max = Work::from_le_bytes([0xff; 32]);
        assert_eq!(checked_add_work(max, one), None);
        assert_eq!(checked_add_work(max, Work::from_le_bytes([0; 32])), Some(max));
    }

    #[test]
    fn test_validation_mode_parsing() {
        assert_eq!("full".parse::<ValidationMode>(), Ok(ValidationMode::Full));
        assert_eq!("Basic".parse::<ValidationMode>(), Ok(ValidationMode::Basic));
        assert_eq!("none".parse::<ValidationMode>(), Ok(ValidationMode::None));
        assert!("strict".parse::<ValidationMode>().is_err());
        assert_eq!(ValidationMode::default(), ValidationMode::Full);
        assert!(ValidationMode::Basic.checks_pow());
        assert!(!ValidationMode::Basic.checks_difficulty());
        assert!(!ValidationMode::None.checks_pow());
    }
}
