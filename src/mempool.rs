//! Pending transfers awaiting block inclusion.
//!
//! A plain FIFO: packing pops from the front in submission order, so earlier
//! transfers spend balance before later ones see it.

use crate::transaction::Transfer;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mempool {
    queue: VecDeque<Transfer>,
}

impl Mempool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_transaction(&mut self, tx: Transfer) {
        self.queue.push_back(tx);
    }

    /// Remove and return the oldest pending transfer.
    pub fn pop_transaction(&mut self) -> Option<Transfer> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transfer> {
        self.queue.iter()
    }
}

impl Extend<Transfer> for Mempool {
    fn extend<I: IntoIterator<Item = Transfer>>(&mut self, iter: I) {
        self.queue.extend(iter);
    }
}

impl FromIterator<Transfer> for Mempool {
    fn from_iter<I: IntoIterator<Item = Transfer>>(iter: I) -> Self {
        Mempool { queue: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut mempool = Mempool::new();
        mempool.add_transaction(Transfer::new(0, 1, 5));
        mempool.extend([Transfer::new(1, 2, 3), Transfer::new(2, 0, 1)]);

        assert_eq!(mempool.len(), 3);
        assert_eq!(mempool.pop_transaction(), Some(Transfer::new(0, 1, 5)));
        assert_eq!(mempool.pop_transaction(), Some(Transfer::new(1, 2, 3)));
        assert_eq!(mempool.pop_transaction(), Some(Transfer::new(2, 0, 1)));
        assert_eq!(mempool.pop_transaction(), None);
        assert!(mempool.is_empty());
    }

    #[test]
    fn test_collect_keeps_order() {
        let mempool: Mempool = vec![Transfer::new(3, 1, 10), Transfer::new(0, 2, 100)]
            .into_iter()
            .collect();
        let order: Vec<_> = mempool.iter().copied().collect();
        assert_eq!(order, vec![Transfer::new(3, 1, 10), Transfer::new(0, 2, 100)]);
    }
}
