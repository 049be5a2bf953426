//! Configuration management for TallyChain

use crate::blockchain::Blockchain;
use crate::error::{ChainError, Result};
use crate::miner::{Miner, ProofOfWork};
use crate::transaction::{Balance, Transfer};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file read when no explicit path is given.
pub const DEFAULT_CONFIG_PATH: &str = "tally.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chain: ChainConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    #[serde(default = "default_block_size")]
    pub block_size: usize,
    #[serde(default = "default_difficulty_target")]
    pub difficulty_target: String,
    #[serde(default)]
    pub max_attempts: Option<u64>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            difficulty_target: default_difficulty_target(),
            max_attempts: None,
        }
    }
}

/// Starting state of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_initial_balances")]
    pub initial_balances: Vec<Balance>,
    #[serde(default = "default_transactions")]
    pub transactions: Vec<Transfer>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            initial_balances: default_initial_balances(),
            transactions: default_transactions(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chain.block_size == 0 {
            return Err(ChainError::InvalidConfig(
                "chain.block_size must be greater than zero".to_string(),
            ));
        }

        if self.chain.difficulty_target.is_empty() {
            return Err(ChainError::InvalidConfig(
                "chain.difficulty_target must not be empty".to_string(),
            ));
        }

        if self.chain.max_attempts == Some(0) {
            return Err(ChainError::InvalidConfig(
                "chain.max_attempts must be greater than zero when set".to_string(),
            ));
        }

        Ok(())
    }

    pub fn proof_of_work(&self) -> Result<ProofOfWork> {
        let pow = ProofOfWork::new(self.chain.difficulty_target.clone())?;
        Ok(match self.chain.max_attempts {
            Some(max) => pow.with_max_attempts(max),
            None => pow,
        })
    }

    /// Uninitialized ledger for this configuration, sealed with SHA-256 and
    /// the system clock.
    pub fn build_blockchain(&self) -> Result<Blockchain> {
        Blockchain::new_with_miner(
            self.ledger.initial_balances.clone(),
            self.ledger.transactions.clone(),
            self.chain.block_size,
            Miner::with_pow(self.proof_of_work()?),
        )
    }
}

/// Load configuration from `path`, or from [`DEFAULT_CONFIG_PATH`] when no
/// path is given. A missing default file yields the built-in defaults; a
/// missing explicit file is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_str = match path {
        Some(path) => fs::read_to_string(path)?,
        None => fs::read_to_string(DEFAULT_CONFIG_PATH).unwrap_or_default(),
    };

    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }

    Config::from_toml_str(&config_str)
}

fn default_block_size() -> usize {
    4
}

fn default_difficulty_target() -> String {
    ProofOfWork::DEFAULT_TARGET.to_string()
}

fn default_initial_balances() -> Vec<Balance> {
    vec![200, 0, 0, 20]
}

fn default_transactions() -> Vec<Transfer> {
    vec![
        Transfer::new(10, 3, 50),
        Transfer::new(0, 2, 100),
        Transfer::new(2, 3, 80),
        Transfer::new(3, 1, 10),
    ]
}
