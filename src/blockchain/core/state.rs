use crate::transaction::{AccountId, Balance, RejectionReason, Transfer};

/// Scratch copy of account balances used while packing blocks.
///
/// Only the packing loop mutates it; the ledger's initial balances are never
/// touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceSheet {
    balances: Vec<Balance>,
}

impl BalanceSheet {
    pub fn new(balances: Vec<Balance>) -> Self {
        Self { balances }
    }

    pub fn get(&self, account: AccountId) -> Option<Balance> {
        self.balances.get(account).copied()
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    pub fn as_slice(&self) -> &[Balance] {
        &self.balances
    }

    pub fn total(&self) -> i128 {
        self.balances.iter().map(|b| *b as i128).sum()
    }

    /// Debit the sender and credit the recipient, or leave every balance
    /// untouched and report why not.
    pub fn apply_transfer(&mut self, tx: &Transfer) -> Result<(), RejectionReason> {
        let (new_sender_balance, new_recipient_balance) = tx.validate_with_state(self)?;
        self.balances[tx.from] = new_sender_balance;
        self.balances[tx.to] = new_recipient_balance;
        Ok(())
    }
}
