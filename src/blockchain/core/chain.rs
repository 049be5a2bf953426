use crate::blockchain::core::state::BalanceSheet;
use crate::blockchain::core::validation::validate_chain;
use crate::error::{ChainError, Result};
use crate::hasher::BlockHasher;
use crate::mempool::Mempool;
use crate::miner::{Miner, ProofOfWork};
use crate::transaction::{AccountId, Balance, Rejection, Transfer};
use tracing::{info, warn};

/// Previous-hash value carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// A sealed group of transfers linked to its predecessor by hash.
///
/// The hash covers `timestamp ‖ transactions ‖ previous_hash ‖ nonce`, each
/// rendered as text and concatenated in that order, with the transfers as
/// compact JSON (`[[0,2,100],[2,3,80]]`).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Block {
    pub(crate) timestamp: u64,
    pub(crate) transactions: Vec<Transfer>,
    pub(crate) previous_hash: String,
    pub(crate) nonce: u64,
    pub(crate) hash: String,
}

impl Block {
    /// Seal a block with SHA-256, the system clock and the default target.
    pub fn new(transactions: Vec<Transfer>, previous_hash: String) -> Result<Self> {
        Self::new_with_miner(transactions, previous_hash, &Miner::default())
    }

    pub fn new_with_miner(
        transactions: Vec<Transfer>,
        previous_hash: String,
        miner: &Miner,
    ) -> Result<Self> {
        let block = Block {
            timestamp: miner.clock().now_millis(),
            transactions,
            previous_hash,
            nonce: 0,
            hash: String::new(),
        };
        miner.mine_block(block)
    }

    pub fn genesis(miner: &Miner) -> Result<Self> {
        Self::new_with_miner(Vec::new(), GENESIS_PREVIOUS_HASH.to_string(), miner)
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn transactions(&self) -> &[Transfer] {
        &self.transactions
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn is_genesis(&self) -> bool {
        self.previous_hash == GENESIS_PREVIOUS_HASH && self.transactions.is_empty()
    }

    /// Hash input up to, but not including, the nonce.
    pub(crate) fn hash_prefix(&self) -> Result<String> {
        let transactions = serde_json::to_string(&self.transactions)?;
        Ok(format!("{}{}{}", self.timestamp, transactions, self.previous_hash))
    }

    /// Recompute the hash from the stored fields.
    pub fn calculate_hash(&self, hasher: &dyn BlockHasher) -> Result<String> {
        let input = format!("{}{}", self.hash_prefix()?, self.nonce);
        Ok(hasher.digest(input.as_bytes()))
    }

    /// Replay this block's transfers for one account.
    ///
    /// A transfer debits `from` and credits `to`; a self-transfer does both and
    /// leaves the balance unchanged. Accounts not involved pass through.
    pub fn account_balance(&self, account: AccountId, starting_balance: Balance) -> Balance {
        self.transactions.iter().fold(starting_balance, |balance, tx| {
            let mut balance = balance;
            if tx.from == account {
                balance = balance.saturating_sub_unsigned(tx.amount);
            }
            if tx.to == account {
                balance = balance.saturating_add_unsigned(tx.amount);
            }
            balance
        })
    }
}

/// Output of one packing pass: the transfers for the next block and the ones
/// dropped along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBlock {
    pub transactions: Vec<Transfer>,
    pub rejections: Vec<Rejection>,
}

pub struct Blockchain {
    initial_balances: Vec<Balance>,
    transactions: Vec<Transfer>,
    block_size: usize,
    blocks: Vec<Block>,
    pending: Mempool,
    rejections: Vec<Rejection>,
    miner: Miner,
}

impl Blockchain {
    /// Create an uninitialized ledger sealed with the default miner.
    pub fn new(
        initial_balances: Vec<Balance>,
        transactions: Vec<Transfer>,
        block_size: usize,
    ) -> Result<Self> {
        Self::new_with_miner(initial_balances, transactions, block_size, Miner::default())
    }

    pub fn new_with_miner(
        initial_balances: Vec<Balance>,
        transactions: Vec<Transfer>,
        block_size: usize,
        miner: Miner,
    ) -> Result<Self> {
        if block_size == 0 {
            return Err(ChainError::InvalidConfig(
                "block size must be greater than zero".to_string(),
            ));
        }

        Ok(Blockchain {
            initial_balances,
            transactions,
            block_size,
            blocks: vec![],
            pending: Mempool::new(),
            rejections: vec![],
            miner,
        })
    }

    /// Build the whole chain: genesis, then blocks packed from every transfer
    /// until the pending queue is drained.
    ///
    /// Runs once. Nothing is committed if sealing fails part way.
    pub fn initialize(&mut self) -> Result<()> {
        if !self.blocks.is_empty() {
            return Err(ChainError::AlreadyInitialized);
        }

        let mut blocks = vec![Block::genesis(&self.miner)?];
        let mut rejections = Vec::new();
        let mut pending = std::mem::take(&mut self.pending);
        pending.extend(self.transactions.iter().copied());
        let mut scratch = BalanceSheet::new(self.initial_balances.clone());

        while !pending.is_empty() {
            let packed = self.create_block(&mut scratch, &mut pending);
            let previous_hash = blocks
                .last()
                .map(|b| b.hash.clone())
                .ok_or_else(|| ChainError::InvalidBlock("chain has no genesis block".to_string()))?;

            let block = Block::new_with_miner(packed.transactions, previous_hash, &self.miner)?;
            rejections.extend(packed.rejections);
            blocks.push(block);
        }

        info!(
            blocks = blocks.len(),
            accepted = self.transactions.len() - rejections.len(),
            rejected = rejections.len(),
            "blockchain initialized"
        );

        self.blocks = blocks;
        self.rejections = rejections;
        self.pending = pending;
        Ok(())
    }

    /// Pop transfers from the front of `pending` until the block is full or the
    /// queue runs dry. Accepted transfers are applied to `scratch`; rejected
    /// ones are dropped for good.
    pub fn create_block(&self, scratch: &mut BalanceSheet, pending: &mut Mempool) -> PackedBlock {
        let mut packed = PackedBlock::default();

        while packed.transactions.len() < self.block_size {
            let Some(tx) = pending.pop_transaction() else {
                break;
            };

            match scratch.apply_transfer(&tx) {
                Ok(()) => packed.transactions.push(tx),
                Err(reason) => {
                    warn!(transfer = %tx, %reason, "invalid transaction");
                    packed.rejections.push(Rejection::new(tx, reason));
                }
            }
        }

        packed
    }

    /// Balance of `account` after replaying every block in chain order.
    pub fn get_balance(&self, account: AccountId) -> Result<Balance> {
        let initial = self
            .initial_balances
            .get(account)
            .copied()
            .ok_or(ChainError::UnknownAccount(account))?;

        Ok(self.replay_balance(account, initial))
    }

    /// Replayed balance of every account, indexed by account id.
    pub fn balances(&self) -> Vec<Balance> {
        self.initial_balances
            .iter()
            .enumerate()
            .map(|(account, initial)| self.replay_balance(account, *initial))
            .collect()
    }

    fn replay_balance(&self, account: AccountId, initial: Balance) -> Balance {
        self.blocks
            .iter()
            .fold(initial, |balance, block| block.account_balance(account, balance))
    }

    pub fn total_supply(&self) -> i128 {
        self.balances().iter().map(|b| *b as i128).sum()
    }

    /// Re-check genesis, linkage, hashes, proof of work, capacity and
    /// overdrafts over the whole chain.
    pub fn verify_chain(&self) -> Result<()> {
        validate_chain(&self.blocks, &self.initial_balances, self.block_size, &self.miner)
    }

    pub fn initial_balances(&self) -> &[Balance] {
        &self.initial_balances
    }

    pub fn transactions(&self) -> &[Transfer] {
        &self.transactions
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn last_block(&self) -> Option<&Block> {
        self.blocks.last()
    }

    pub fn height(&self) -> usize {
        self.blocks.len()
    }

    pub fn pending(&self) -> &Mempool {
        &self.pending
    }

    /// Transfers dropped during the last `initialize`, in queue order.
    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    pub fn pow(&self) -> &ProofOfWork {
        self.miner.pow()
    }
}
