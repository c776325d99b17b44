//! Test utilities for the btc-relay workspace
//!
//! Header builders that mine against easy targets, real mainnet header
//! fixtures, and assertion macros shared by the relay tests.

pub mod builders;
pub mod fixtures;
pub mod macros;

pub use builders::*;
pub use fixtures::*;
