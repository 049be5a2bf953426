//! TallyChain - A minimal single-node ledger sealed by proof of work
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core Ledger
//! - [`blockchain`] - Blocks, chain assembly, balance replay and validation
//! - [`transaction`] - Transfers and rejection records
//! - [`mempool`] - Pending transfer queue
//!
//! ## Consensus
//! - [`miner`] - Proof-of-work sealing
//!
//! ## Capabilities
//! - [`hasher`] - Pluggable digest function (SHA-256 by default)
//! - [`clock`] - Time source for block timestamps
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod blockchain;
pub mod mempool;
pub mod transaction;

// ============================================================================
// Consensus
// ============================================================================
pub mod miner;

// ============================================================================
// Capabilities
// ============================================================================
pub mod clock;
pub mod hasher;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;
