use crate::blockchain::core::chain::{Block, GENESIS_PREVIOUS_HASH};
use crate::blockchain::core::state::BalanceSheet;
use crate::error::ChainError;
use crate::miner::Miner;
use crate::transaction::Balance;

/// Check a full chain against the rules it was built under.
pub fn validate_chain(
    blocks: &[Block],
    initial_balances: &[Balance],
    block_size: usize,
    miner: &Miner,
) -> Result<(), ChainError> {
    let Some(genesis) = blocks.first() else {
        return Ok(());
    };

    if !genesis.transactions.is_empty() || genesis.previous_hash != GENESIS_PREVIOUS_HASH {
        return Err(ChainError::InvalidBlock(
            "Genesis block must be empty and point at \"0\".".to_string(),
        ));
    }

    for (height, block) in blocks.iter().enumerate() {
        validate_block_hash(block, miner)?;

        if height == 0 {
            continue;
        }

        if block.previous_hash != blocks[height - 1].hash {
            return Err(ChainError::InvalidBlockLinkage);
        }

        if block.transactions.len() > block_size {
            return Err(ChainError::InvalidBlock(format!(
                "Block {} holds {} transactions, capacity is {}.",
                height,
                block.transactions.len(),
                block_size
            )));
        }
    }

    validate_no_overdraft(blocks, initial_balances)
}

/// The stored hash must match a fresh computation and meet the target.
pub fn validate_block_hash(block: &Block, miner: &Miner) -> Result<(), ChainError> {
    let expected = block.calculate_hash(miner.hasher())?;
    if expected != block.hash {
        return Err(ChainError::InvalidBlock(format!(
            "Hash mismatch. Expected {}, but got {}.",
            expected, block.hash
        )));
    }

    if !miner.pow().meets_target(&block.hash) {
        return Err(ChainError::InvalidProofOfWork);
    }

    Ok(())
}

/// Replaying the chain from the initial balances must never overdraw an
/// account or touch one that does not exist.
pub fn validate_no_overdraft(blocks: &[Block], initial_balances: &[Balance]) -> Result<(), ChainError> {
    let mut sheet = BalanceSheet::new(initial_balances.to_vec());

    for (height, block) in blocks.iter().enumerate() {
        for tx in &block.transactions {
            sheet.apply_transfer(tx).map_err(|reason| {
                ChainError::InvalidBlock(format!(
                    "Transaction {} in block {} is invalid: {}.",
                    tx, height, reason
                ))
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::Blockchain;
    use crate::clock::FixedClock;
    use crate::hasher::Sha256Hasher;
    use crate::miner::ProofOfWork;
    use crate::transaction::Transfer;

    fn quick_miner() -> Miner {
        Miner::new(
            ProofOfWork::new("a").unwrap(),
            Box::new(Sha256Hasher),
            Box::new(FixedClock(1672531200000)),
        )
    }

    fn built_blocks() -> Vec<Block> {
        let mut chain = Blockchain::new_with_miner(
            vec![200, 0, 0, 20],
            vec![Transfer::new(0, 2, 100), Transfer::new(2, 3, 80), Transfer::new(3, 1, 10)],
            2,
            quick_miner(),
        )
        .unwrap();
        chain.initialize().unwrap();
        chain.blocks().to_vec()
    }

    #[test]
    fn test_valid_chain() {
        let blocks = built_blocks();
        assert_eq!(blocks.len(), 3);
        assert!(validate_chain(&blocks, &[200, 0, 0, 20], 2, &quick_miner()).is_ok());
    }

    #[test]
    fn test_empty_chain_is_valid() {
        assert!(validate_chain(&[], &[1, 2], 2, &quick_miner()).is_ok());
    }

    #[test]
    fn test_tampered_amount_detected() {
        let mut blocks = built_blocks();
        blocks[1].transactions[0].amount = 150;
        assert!(matches!(
            validate_chain(&blocks, &[200, 0, 0, 20], 2, &quick_miner()),
            Err(ChainError::InvalidBlock(_))
        ));
    }

    #[test]
    fn test_broken_linkage_detected() {
        let miner = quick_miner();
        let mut blocks = built_blocks();
        let replacement =
            Block::new_with_miner(blocks[2].transactions.clone(), "a-different-parent".to_string(), &miner)
                .unwrap();
        blocks[2] = replacement;
        assert_eq!(
            validate_chain(&blocks, &[200, 0, 0, 20], 2, &miner),
            Err(ChainError::InvalidBlockLinkage)
        );
    }

    #[test]
    fn test_wrong_target_detected() {
        let blocks = built_blocks();
        let strict = Miner::new(
            ProofOfWork::new("zz").unwrap(),
            Box::new(Sha256Hasher),
            Box::new(FixedClock(0)),
        );
        assert_eq!(validate_block_hash(&blocks[0], &strict), Err(ChainError::InvalidProofOfWork));
    }

    #[test]
    fn test_capacity_detected() {
        let blocks = built_blocks();
        assert!(matches!(
            validate_chain(&blocks, &[200, 0, 0, 20], 1, &quick_miner()),
            Err(ChainError::InvalidBlock(_))
        ));
    }

    #[test]
    fn test_overdraft_detected() {
        let blocks = built_blocks();
        assert!(matches!(
            validate_no_overdraft(&blocks, &[50, 0, 0, 20]),
            Err(ChainError::InvalidBlock(_))
        ));
    }
}
