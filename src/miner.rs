//! Proof-of-work sealing.
//!
//! A block is sealed by searching nonces upward from zero until the block hash
//! starts with the difficulty target.

use crate::blockchain::Block;
use crate::clock::{Clock, SystemClock};
use crate::error::{ChainError, Result};
use crate::hasher::{BlockHasher, Sha256Hasher};
use std::fmt;
use tracing::debug;

/// Difficulty target and search limit.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProofOfWork {
    /// Required hash prefix.
    pub target: String,
    /// Give up after this many nonce attempts. `None` searches until a match.
    pub max_attempts: Option<u64>,
}

impl ProofOfWork {
    pub const DEFAULT_TARGET: &'static str = "1234";

    pub fn new(target: impl Into<String>) -> Result<Self> {
        let target = target.into();
        if target.is_empty() {
            return Err(ChainError::InvalidConfig(
                "difficulty target must not be empty".to_string(),
            ));
        }
        Ok(ProofOfWork { target, max_attempts: None })
    }

    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn meets_target(&self, hash: &str) -> bool {
        hash.starts_with(&self.target)
    }
}

impl Default for ProofOfWork {
    fn default() -> Self {
        ProofOfWork {
            target: Self::DEFAULT_TARGET.to_string(),
            max_attempts: None,
        }
    }
}

/// Everything needed to stamp and seal a block: difficulty, hash function and
/// time source.
pub struct Miner {
    pow: ProofOfWork,
    hasher: Box<dyn BlockHasher>,
    clock: Box<dyn Clock>,
}

impl Miner {
    pub fn new(pow: ProofOfWork, hasher: Box<dyn BlockHasher>, clock: Box<dyn Clock>) -> Self {
        Miner { pow, hasher, clock }
    }

    /// SHA-256 and the system clock with the given difficulty.
    pub fn with_pow(pow: ProofOfWork) -> Self {
        Self::new(pow, Box::new(Sha256Hasher), Box::new(SystemClock))
    }

    pub fn pow(&self) -> &ProofOfWork {
        &self.pow
    }

    pub fn hasher(&self) -> &dyn BlockHasher {
        self.hasher.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Run the nonce search on an unsealed block and fix its hash.
    pub fn mine_block(&self, mut block: Block) -> Result<Block> {
        // Everything ahead of the nonce is fixed for the whole search.
        let prefix = block.hash_prefix()?;
        let mut nonce: u64 = 0;

        loop {
            if let Some(max) = self.pow.max_attempts {
                if nonce >= max {
                    return Err(ChainError::SealingTimeout { attempts: nonce });
                }
            }

            let hash = self.hasher.digest(format!("{}{}", prefix, nonce).as_bytes());
            if self.pow.meets_target(&hash) {
                debug!(nonce, %hash, txs = block.transactions.len(), "sealed block");
                block.nonce = nonce;
                block.hash = hash;
                return Ok(block);
            }

            nonce = nonce.checked_add(1).ok_or(ChainError::SealingTimeout { attempts: u64::MAX })?;
        }
    }
}

impl Default for Miner {
    fn default() -> Self {
        Self::with_pow(ProofOfWork::default())
    }
}

impl fmt::Debug for Miner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Miner").field("pow", &self.pow).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::transaction::Transfer;

    struct ConstantHasher(&'static str);

    impl BlockHasher for ConstantHasher {
        fn digest(&self, _input: &[u8]) -> String {
            self.0.to_string()
        }
    }

    fn quick_miner() -> Miner {
        Miner::new(
            ProofOfWork::new("1").unwrap(),
            Box::new(Sha256Hasher),
            Box::new(FixedClock(1672531200000)),
        )
    }

    #[test]
    fn test_empty_target_rejected() {
        assert!(matches!(ProofOfWork::new(""), Err(ChainError::InvalidConfig(_))));
    }

    #[test]
    fn test_default_target() {
        let pow = ProofOfWork::default();
        assert_eq!(pow.target, "1234");
        assert!(pow.meets_target("1234abcd"));
        assert!(!pow.meets_target("0123abcd"));
        assert!(pow.max_attempts.is_none());
    }

    #[test]
    fn test_mined_hash_meets_target() {
        let miner = quick_miner();
        let block = Block::new_with_miner(vec![Transfer::new(0, 1, 5)], "0".to_string(), &miner).unwrap();
        assert!(block.hash().starts_with('1'));
        assert_eq!(block.calculate_hash(miner.hasher()).unwrap(), block.hash());
    }

    #[test]
    fn test_first_nonce_accepted_when_hash_matches() {
        let miner = Miner::new(
            ProofOfWork::default(),
            Box::new(ConstantHasher("1234ffff")),
            Box::new(FixedClock(0)),
        );
        let block = Block::new_with_miner(vec![], "0".to_string(), &miner).unwrap();
        assert_eq!(block.nonce(), 0);
        assert_eq!(block.hash(), "1234ffff");
    }

    #[test]
    fn test_sealing_timeout() {
        let miner = Miner::new(
            ProofOfWork::default().with_max_attempts(50),
            Box::new(ConstantHasher("0000ffff")),
            Box::new(FixedClock(0)),
        );
        let result = Block::new_with_miner(vec![], "0".to_string(), &miner);
        assert_eq!(result, Err(ChainError::SealingTimeout { attempts: 50 }));
    }

    #[test]
    fn test_mining_is_deterministic_with_fixed_clock() {
        let miner = quick_miner();
        let txs = vec![Transfer::new(0, 2, 100), Transfer::new(2, 3, 80)];
        let a = Block::new_with_miner(txs.clone(), "abc".to_string(), &miner).unwrap();
        let b = Block::new_with_miner(txs, "abc".to_string(), &miner).unwrap();
        assert_eq!(a, b);
    }
}
