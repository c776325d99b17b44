//! Validation functionality for submitted headers.

mod header;

pub use header::{BlockHeaderValidator, HeaderContext};

use crate::error::ValidationResult;

pub trait Validator<T> {
    fn validate(&self, data: T) -> ValidationResult<()>;
}
