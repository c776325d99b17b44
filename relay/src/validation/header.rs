use bitcoin::block::Header as BlockHeader;
use bitcoin::Target;

use crate::error::{ValidationError, ValidationResult};
use crate::types::{HashedBlockHeader, StoredHeader, ValidationMode};
use crate::validation::Validator;

/// A candidate header together with the stored parent it extends.
#[derive(Debug, Clone, Copy)]
pub struct HeaderContext<'a> {
    pub header: &'a HashedBlockHeader,
    pub parent: &'a StoredHeader,
    pub height: u32,
}

/// Checks proof of work and difficulty continuity of a header that is
/// already known to link to its parent.
#[derive(Debug, Clone)]
pub struct BlockHeaderValidator {
    mode: ValidationMode,
    pow_limit: Target,
    retarget_interval: u32,
}

impl BlockHeaderValidator {
    pub fn new(mode: ValidationMode, pow_limit: Target, retarget_interval: u32) -> Self {
        Self {
            mode,
            pow_limit,
            retarget_interval,
        }
    }

    /// Check that the header's target is non-zero and within the network limit.
    ///
    /// Applied to every submission in the proof of work modes and to the
    /// genesis header regardless of mode, so cumulative work stays bounded.
    pub fn check_target(&self, header: &BlockHeader) -> ValidationResult<Target> {
        let target = header.target();
        if target == Target::ZERO {
            return Err(ValidationError::ZeroTarget(header.bits));
        }
        if target > self.pow_limit {
            return Err(ValidationError::TargetAboveLimit(header.bits));
        }
        Ok(target)
    }

    fn is_retarget_height(&self, height: u32) -> bool {
        self.retarget_interval != 0 && height % self.retarget_interval == 0
    }
}

impl Validator<&HeaderContext<'_>> for BlockHeaderValidator {
    fn validate(&self, ctx: &HeaderContext<'_>) -> ValidationResult<()> {
        if !self.mode.checks_pow() {
            tracing::debug!("Skipping proof of work check for {}: disabled", ctx.header.hash());
            return Ok(());
        }

        let header = ctx.header.header();
        let target = self.check_target(header)?;
        if !target.is_met_by(*ctx.header.hash()) {
            return Err(ValidationError::InvalidProofOfWork);
        }

        // Retarget values are not recomputed; only non-boundary blocks are pinned.
        if self.mode.checks_difficulty() && !self.is_retarget_height(ctx.height) {
            let expected = ctx.parent.header.header().bits;
            if header.bits != expected {
                return Err(ValidationError::TargetMismatch {
                    expected,
                    actual: header.bits,
                });
            }
        }

        tracing::trace!("Header {} passed validation in mode {:?}", ctx.header.hash(), self.mode);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bitcoin::block::{Header as BlockHeader, Version};
    use bitcoin::hashes::Hash;
    use bitcoin::{BlockHash, CompactTarget, TxMerkleNode};

    use super::*;

    const REGTEST_BITS: u32 = 0x207fffff;

    fn mine(prev: BlockHash, bits: u32) -> HashedBlockHeader {
        let mut header = BlockHeader {
            version: Version::ONE,
            prev_blockhash: prev,
            merkle_root: TxMerkleNode::all_zeros(),
            time: 1_600_000_000,
            bits: CompactTarget::from_consensus(bits),
            nonce: 0,
        };
        while !header.target().is_met_by(header.block_hash()) {
            header.nonce += 1;
        }
        HashedBlockHeader::from(header)
    }

    fn stored(header: HashedBlockHeader, height: u32) -> StoredHeader {
        StoredHeader {
            chain_work: header.header().work(),
            header,
            height,
        }
    }

    fn validator(mode: ValidationMode) -> BlockHeaderValidator {
        BlockHeaderValidator::new(mode, Target::MAX_ATTAINABLE_REGTEST, 2016)
    }

    #[test]
    fn test_mined_header_passes() {
        let parent = stored(mine(BlockHash::all_zeros(), REGTEST_BITS), 0);
        let child = mine(*parent.header.hash(), REGTEST_BITS);
        let ctx = HeaderContext {
            header: &child,
            parent: &parent,
            height: 1,
        };
        assert!(validator(ValidationMode::Full).validate(&ctx).is_ok());
    }

    #[test]
    fn test_unmet_target_fails() {
        let parent = stored(mine(BlockHash::all_zeros(), REGTEST_BITS), 0);
        let mut header = *mine(*parent.header.hash(), REGTEST_BITS).header();
        while header.target().is_met_by(header.block_hash()) {
            header.nonce += 1;
        }
        let child = HashedBlockHeader::from(header);
        let ctx = HeaderContext {
            header: &child,
            parent: &parent,
            height: 1,
        };

        assert_eq!(
            validator(ValidationMode::Basic).validate(&ctx),
            Err(ValidationError::InvalidProofOfWork)
        );
        assert!(validator(ValidationMode::None).validate(&ctx).is_ok());
    }

    #[test]
    fn test_target_above_limit_fails() {
        let parent = stored(mine(BlockHash::all_zeros(), REGTEST_BITS), 0);
        // Target of 0x2100ffff exceeds the regtest limit and is met by almost any hash
        let child = mine(*parent.header.hash(), 0x2100ffff);
        let ctx = HeaderContext {
            header: &child,
            parent: &parent,
            height: 1,
        };

        assert_eq!(
            validator(ValidationMode::Basic).validate(&ctx),
            Err(ValidationError::TargetAboveLimit(CompactTarget::from_consensus(0x2100ffff)))
        );
    }

    #[test]
    fn test_zero_target_fails() {
        let parent = stored(mine(BlockHash::all_zeros(), REGTEST_BITS), 0);
        let mut header = *parent.header.header();
        header.bits = CompactTarget::from_consensus(0);

        let none = validator(ValidationMode::None);
        assert_eq!(
            none.check_target(&header),
            Err(ValidationError::ZeroTarget(CompactTarget::from_consensus(0)))
        );
        assert_eq!(none.check_target(parent.header.header()), Ok(Target::MAX_ATTAINABLE_REGTEST));
    }

    #[test]
    fn test_difficulty_change_outside_retarget() {
        let parent = stored(mine(BlockHash::all_zeros(), REGTEST_BITS), 0);
        let child = mine(*parent.header.hash(), 0x2000ffff);
        let ctx = HeaderContext {
            header: &child,
            parent: &parent,
            height: 1,
        };

        assert_eq!(
            validator(ValidationMode::Full).validate(&ctx),
            Err(ValidationError::TargetMismatch {
                expected: CompactTarget::from_consensus(REGTEST_BITS),
                actual: CompactTarget::from_consensus(0x2000ffff),
            })
        );
        // Basic mode does not pin difficulty
        assert!(validator(ValidationMode::Basic).validate(&ctx).is_ok());
    }

    #[test]
    fn test_difficulty_change_at_retarget() {
        let parent = stored(mine(BlockHash::all_zeros(), REGTEST_BITS), 2015);
        let child = mine(*parent.header.hash(), 0x2000ffff);
        let ctx = HeaderContext {
            header: &child,
            parent: &parent,
            height: 2016,
        };

        assert!(validator(ValidationMode::Full).validate(&ctx).is_ok());
    }
}
