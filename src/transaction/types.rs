/// Transaction types for TallyChain
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index into the balance vector. The index is the account's identity.
pub type AccountId = usize;

/// Running account balance.
pub type Balance = i64;

/// Transfer amount; transfers never move negative value.
pub type Amount = u64;

/// A directed movement of value between two accounts.
///
/// Serialized as the tuple `[from, to, amount]`; block hashes cover this
/// encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(AccountId, AccountId, Amount)", into = "(AccountId, AccountId, Amount)")]
pub struct Transfer {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Amount,
}

impl Transfer {
    pub fn new(from: AccountId, to: AccountId, amount: Amount) -> Self {
        Transfer { from, to, amount }
    }

    pub fn is_self_transfer(&self) -> bool {
        self.from == self.to
    }
}

impl From<(AccountId, AccountId, Amount)> for Transfer {
    fn from((from, to, amount): (AccountId, AccountId, Amount)) -> Self {
        Transfer { from, to, amount }
    }
}

impl From<Transfer> for (AccountId, AccountId, Amount) {
    fn from(tx: Transfer) -> Self {
        (tx.from, tx.to, tx.amount)
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{},{},{}]", self.from, self.to, self.amount)
    }
}

/// Why a pending transfer was left out of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    /// The sender cannot cover the amount from its running balance.
    InsufficientBalance,
    /// Sender or recipient is not present in the initial balances.
    UnknownAccount,
    /// Crediting the recipient would exceed the largest representable balance.
    BalanceOverflow,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RejectionReason::InsufficientBalance => write!(f, "insufficient balance"),
            RejectionReason::UnknownAccount => write!(f, "unknown account"),
            RejectionReason::BalanceOverflow => write!(f, "balance overflow"),
        }
    }
}

/// A transfer dropped during block packing, with the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub transfer: Transfer,
    pub reason: RejectionReason,
}

impl Rejection {
    pub fn new(transfer: Transfer, reason: RejectionReason) -> Self {
        Rejection { transfer, reason }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} rejected: {}", self.transfer, self.reason)
    }
}
