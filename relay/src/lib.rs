//! Bitcoin block header relay.
//!
//! The relay is anchored on a trusted genesis header and then accepts
//! submitted headers that extend what it already stores:
//!
//! - headers must be exactly 80 bytes; anything else is rejected with
//!   `ERR_INVALID_HEADER` and nothing is stored
//! - each header must link to a stored parent and sit one block above it
//! - depending on the [`ValidationMode`], proof of work and difficulty
//!   continuity are checked
//! - transactions can be proven included in a stored block with a merkle
//!   branch
//!
//! # Example
//!
//! ```
//! use btc_relay::{Relay, RelayConfig};
//!
//! let genesis = "0100000000000000000000000000000000000000000000000000000000000000000000003ba3edfd7a7b12b27ac72c3e67768f617fc81bc3888a51323a9fb8aa4b1e5e4a29ab5f49ffff001d1dac2b7c";
//! let block_1 = "010000006fe28c0ab6f1b372c1a6a246ae63f74f931e8365e15a089c68d6190000000000982051fd1e4ba744bbbe680e1fee14677ba1a3c3540bf7b1cdb606e857233e0e61bc6649ffff001d01e36299";
//!
//! let mut relay = Relay::new(RelayConfig::mainnet());
//! relay.initialize_hex(genesis, 0).unwrap();
//!
//! let err = relay.submit_hex(&block_1[..56], 1).unwrap_err();
//! assert_eq!(err.code(), "ERR_INVALID_HEADER");
//!
//! let accepted = relay.submit_hex(block_1, 1).unwrap();
//! assert_eq!(accepted.height, 1);
//! ```

pub mod config;
pub mod error;
pub mod fixture;
pub mod logging;
pub mod merkle;
pub mod relay;
pub mod storage;
pub mod types;
pub mod validation;

pub use config::RelayConfig;
pub use error::{codes, Error, RelayError, RelayResult, StorageError, ValidationError};
pub use logging::{
    init_console_logging, init_logging, LogFileConfig, LogRotation, LoggingConfig, LoggingGuard,
};
pub use relay::Relay;
pub use storage::{HeaderStore, MemoryHeaderStore};
pub use tracing::level_filters::LevelFilter;
pub use types::{Accepted, HashedBlockHeader, RawHeader, StoredHeader, ValidationMode, HEADER_SIZE};

pub use bitcoin::{BlockHash, Network, TxMerkleNode, Txid};

/// Current version of the btc-relay library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
