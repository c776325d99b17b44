//! Common test fixtures and constants
//!
//! The first four Bitcoin mainnet headers. Each of blocks 1-3 holds only a
//! coinbase transaction, so its txid equals the header's merkle root.

use bitcoin::block::Header;
use bitcoin::consensus::deserialize;
use bitcoin::{BlockHash, Txid};

pub const GENESIS_HEADER: &str = "0100000000000000000000000000000000000000000000000000000000000000000000003ba3edfd7a7b12b27ac72c3e67768f617fc81bc3888a51323a9fb8aa4b1e5e4a29ab5f49ffff001d1dac2b7c";
pub const BLOCK_1_HEADER: &str = "010000006fe28c0ab6f1b372c1a6a246ae63f74f931e8365e15a089c68d6190000000000982051fd1e4ba744bbbe680e1fee14677ba1a3c3540bf7b1cdb606e857233e0e61bc6649ffff001d01e36299";
pub const BLOCK_2_HEADER: &str = "010000004860eb18bf1b1620e37e9490fc8a427514416fd75159ab86688e9a8300000000d5fdcc541e25de1c7a5addedf24858b8bb665c9f36ef744ee42c316022c90f9bb0bc6649ffff001d08d2bd61";
pub const BLOCK_3_HEADER: &str = "01000000bddd99ccfda39da1b108ce1a5d70038d0a967bacb68b6b63065f626a0000000044f672226090d85db9a9f2fbfe5f0f9609b387af7be5b7fbb7a1767c831c9e995dbe6649ffff001d05e0ed6d";

pub const GENESIS_HASH: &str = "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";
pub const BLOCK_1_HASH: &str = "00000000839a8e6886ab5951d76f411475428afc90947ee320161bbf18eb6048";
pub const BLOCK_2_HASH: &str = "000000006a625f06636b8bb6ac7b960a8d03705d1ace08b1a19da3fdcc99ddbd";
pub const BLOCK_3_HASH: &str = "0000000082b5015589a3fdf2d4baff403e6f0be035a5d9742c1cae6295464449";

/// Mainnet headers 0-3 as `(hex, height)` pairs.
pub const MAINNET_HEADERS: [(&str, u32); 4] =
    [(GENESIS_HEADER, 0), (BLOCK_1_HEADER, 1), (BLOCK_2_HEADER, 2), (BLOCK_3_HEADER, 3)];

pub fn header_raw(hex_header: &str) -> Vec<u8> {
    hex::decode(hex_header).expect("fixture hex is valid")
}

pub fn header(hex_header: &str) -> Header {
    deserialize(&header_raw(hex_header)).expect("fixture header decodes")
}

pub fn block_hash(hex_hash: &str) -> BlockHash {
    hex_hash.parse().expect("fixture hash is valid")
}

/// Txid of the only transaction in mainnet block `height` (1..=3).
pub fn coinbase_txid(height: u32) -> Txid {
    let hex_header = match height {
        1 => BLOCK_1_HEADER,
        2 => BLOCK_2_HEADER,
        3 => BLOCK_3_HEADER,
        _ => panic!("no single-transaction fixture for height {}", height),
    };
    Txid::from_raw_hash(header(hex_header).merkle_root.to_raw_hash())
}

/// Header fixture JSON in the format the relay CLI replays.
pub fn mainnet_fixture_json() -> String {
    let entries: Vec<_> = MAINNET_HEADERS
        .iter()
        .map(|(header, height)| serde_json::json!({ "header": header, "height": height }))
        .collect();
    serde_json::Value::Array(entries).to_string()
}
