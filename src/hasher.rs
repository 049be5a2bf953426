//! Pluggable digest function used to seal and link blocks.

use sha2::{Digest, Sha256};

/// A one-way hash over a byte encoding, rendered as lower-case hex.
pub trait BlockHasher: Send + Sync {
    fn digest(&self, input: &[u8]) -> String;
}

/// SHA-256, hex encoded. The default hasher for every chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl BlockHasher for Sha256Hasher {
    fn digest(&self, input: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(input);
        hex::encode(hasher.finalize())
    }
}
