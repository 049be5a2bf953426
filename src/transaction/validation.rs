/// Validation logic for transfers separated from type definitions
use crate::blockchain::BalanceSheet;
use crate::transaction::types::{Balance, RejectionReason, Transfer};

impl Transfer {
    /// Check this transfer against running balances.
    ///
    /// Returns the sender's and the recipient's balances after the transfer.
    /// Both accounts must already exist; there is no implicit account creation.
    pub fn validate_with_state(
        &self,
        state: &BalanceSheet,
    ) -> Result<(Balance, Balance), RejectionReason> {
        let (Some(sender_balance), Some(recipient_balance)) = (state.get(self.from), state.get(self.to))
        else {
            return Err(RejectionReason::UnknownAccount);
        };

        let new_sender_balance = match sender_balance.checked_sub_unsigned(self.amount) {
            Some(balance) if balance >= 0 => balance,
            _ => return Err(RejectionReason::InsufficientBalance),
        };

        // A self-transfer is credited on top of its own debit.
        let credit_base = if self.is_self_transfer() {
            new_sender_balance
        } else {
            recipient_balance
        };
        let new_recipient_balance = credit_base
            .checked_add_unsigned(self.amount)
            .ok_or(RejectionReason::BalanceOverflow)?;

        Ok((new_sender_balance, new_recipient_balance))
    }
}
