//! Error types for the header relay.

use std::io;

use bitcoin::{BlockHash, CompactTarget};
use thiserror::Error;

/// Stable error codes surfaced to callers of the relay.
///
/// These mirror the codes a relay contract reverts with, so callers can
/// match on the code string without depending on the Rust variant.
pub mod codes {
    pub const ERR_NOT_INITIALIZED: &str = "ERR_NOT_INITIALIZED";
    pub const ERR_GENESIS_SET: &str = "ERR_GENESIS_SET";
    pub const ERR_INVALID_HEADER: &str = "ERR_INVALID_HEADER";
    pub const ERR_DUPLICATE_BLOCK: &str = "ERR_DUPLICATE_BLOCK";
    pub const ERR_PREV_BLOCK: &str = "ERR_PREV_BLOCK";
    pub const ERR_INVALID_HEIGHT: &str = "ERR_INVALID_HEIGHT";
    pub const ERR_CHAIN_WORK: &str = "ERR_CHAIN_WORK";
    pub const ERR_LOW_DIFF: &str = "ERR_LOW_DIFF";
    pub const ERR_DIFF_TARGET_HEADER: &str = "ERR_DIFF_TARGET_HEADER";
    pub const ERR_BLOCK_NOT_FOUND: &str = "ERR_BLOCK_NOT_FOUND";
    pub const ERR_MERKLE_PROOF: &str = "ERR_MERKLE_PROOF";
    pub const ERR_STORAGE: &str = "ERR_STORAGE";
}

/// Top-level error type for the relay binary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors returned by relay operations.
///
/// Every variant rejects the operation without touching stored state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("Relay has no genesis header")]
    NotInitialized,

    #[error("Genesis header already set")]
    GenesisSet,

    #[error("Invalid block header: expected {expected} bytes, got {actual}")]
    InvalidHeader {
        expected: usize,
        actual: usize,
    },

    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),

    #[error("Block {0} is already stored")]
    DuplicateBlock(BlockHash),

    #[error("Previous block {0} is not stored")]
    PrevBlock(BlockHash),

    #[error("Claimed height {claimed} does not extend parent, expected {expected}")]
    InvalidHeight {
        claimed: u32,
        expected: u32,
    },

    #[error("Parent {0} is at the maximum height, no block can extend it")]
    HeightOverflow(BlockHash),

    #[error("Cumulative chain work overflows at block {0}")]
    ChainWorkOverflow(BlockHash),

    #[error("Insufficient proof of work: {0}")]
    LowDiff(String),

    #[error("Difficulty target {actual:?} does not match expected {expected:?}")]
    DiffTargetHeader {
        expected: CompactTarget,
        actual: CompactTarget,
    },

    #[error("Block {0} not found")]
    BlockNotFound(BlockHash),

    #[error("Invalid merkle proof: {0}")]
    InvalidMerkleProof(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl RelayError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::NotInitialized => codes::ERR_NOT_INITIALIZED,
            RelayError::GenesisSet => codes::ERR_GENESIS_SET,
            RelayError::InvalidHeader {
                ..
            }
            | RelayError::InvalidHex(_) => codes::ERR_INVALID_HEADER,
            RelayError::DuplicateBlock(_) => codes::ERR_DUPLICATE_BLOCK,
            RelayError::PrevBlock(_) => codes::ERR_PREV_BLOCK,
            RelayError::InvalidHeight {
                ..
            }
            | RelayError::HeightOverflow(_) => codes::ERR_INVALID_HEIGHT,
            RelayError::ChainWorkOverflow(_) => codes::ERR_CHAIN_WORK,
            RelayError::LowDiff(_) => codes::ERR_LOW_DIFF,
            RelayError::DiffTargetHeader {
                ..
            } => codes::ERR_DIFF_TARGET_HEADER,
            RelayError::BlockNotFound(_) => codes::ERR_BLOCK_NOT_FOUND,
            RelayError::InvalidMerkleProof(_) => codes::ERR_MERKLE_PROOF,
            RelayError::Storage(_) => codes::ERR_STORAGE,
        }
    }
}

impl From<ValidationError> for RelayError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidProofOfWork => {
                RelayError::LowDiff("block hash does not meet target".to_string())
            }
            ValidationError::ZeroTarget(bits) => RelayError::LowDiff(format!(
                "target {:#010x} is zero and cannot be met",
                bits.to_consensus()
            )),
            ValidationError::TargetAboveLimit(bits) => RelayError::LowDiff(format!(
                "target {:#010x} is above the network limit",
                bits.to_consensus()
            )),
            ValidationError::TargetMismatch {
                expected,
                actual,
            } => RelayError::DiffTargetHeader {
                expected,
                actual,
            },
        }
    }
}

/// Header validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid proof of work")]
    InvalidProofOfWork,

    #[error("Target {0:?} is zero")]
    ZeroTarget(CompactTarget),

    #[error("Target {0:?} exceeds proof of work limit")]
    TargetAboveLimit(CompactTarget),

    #[error("Target {actual:?} does not match parent target {expected:?}")]
    TargetMismatch {
        expected: CompactTarget,
        actual: CompactTarget,
    },
}

/// Storage-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Header {0} already exists")]
    AlreadyExists(BlockHash),

    #[error("Inconsistent state: {0}")]
    InconsistentState(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("Failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Logging-related errors.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory: {0}")]
    DirectoryCreation(#[from] io::Error),

    #[error("Subscriber initialization failed: {0}")]
    SubscriberInit(String),

    #[error("Failed to open log file: {0}")]
    FileAppender(String),
}

/// Errors while loading a header fixture file.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse fixture: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Fixture contains no genesis entry")]
    Empty,
}

/// Type alias for Result with the top-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Type alias for relay operation results.
pub type RelayResult<T> = std::result::Result<T, RelayError>;

/// Type alias for validation results.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Type alias for storage operation results.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Type alias for configuration results.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Type alias for logging operation results.
pub type LoggingResult<T> = std::result::Result<T, LoggingError>;
