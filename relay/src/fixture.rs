//! Header fixture files replayed by the CLI.
//!
//! A fixture is a JSON array of `{"header": "<hex>", "height": N}` entries.
//! The first entry is the genesis record.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FixtureError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub header: String,
    pub height: u32,
}

/// A genesis entry followed by the headers to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFixture {
    pub genesis: HeaderEntry,
    pub submissions: Vec<HeaderEntry>,
}

impl HeaderFixture {
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let mut entries: Vec<HeaderEntry> = serde_json::from_str(json)?;
        if entries.is_empty() {
            return Err(FixtureError::Empty);
        }
        let genesis = entries.remove(0);
        Ok(Self {
            genesis,
            submissions: entries,
        })
    }

    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
