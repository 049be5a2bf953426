//! Transaction module split into types and validation for better modularity

pub mod types;
pub mod validation;

pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::BalanceSheet;

    #[test]
    fn test_transfer_serializes_as_tuple() {
        let tx = Transfer::new(0, 2, 100);
        assert_eq!(serde_json::to_string(&tx).unwrap(), "[0,2,100]");

        let batch = vec![Transfer::new(0, 2, 100), Transfer::new(2, 3, 80)];
        assert_eq!(serde_json::to_string(&batch).unwrap(), "[[0,2,100],[2,3,80]]");
    }

    #[test]
    fn test_transfer_deserializes_from_tuple() {
        let txs: Vec<Transfer> = serde_json::from_str("[[10,3,50],[3,1,10]]").unwrap();
        assert_eq!(txs, vec![Transfer::new(10, 3, 50), Transfer::new(3, 1, 10)]);
    }

    #[test]
    fn test_validate_unknown_sender() {
        let sheet = BalanceSheet::new(vec![200, 0, 0, 20]);
        let tx = Transfer::new(10, 3, 50);
        assert_eq!(tx.validate_with_state(&sheet), Err(RejectionReason::UnknownAccount));
    }

    #[test]
    fn test_validate_unknown_recipient() {
        let sheet = BalanceSheet::new(vec![200, 0]);
        let tx = Transfer::new(0, 5, 10);
        assert_eq!(tx.validate_with_state(&sheet), Err(RejectionReason::UnknownAccount));
    }

    #[test]
    fn test_validate_unknown_sender_zero_amount() {
        let sheet = BalanceSheet::new(vec![200, 0]);
        let tx = Transfer::new(4, 1, 0);
        assert_eq!(tx.validate_with_state(&sheet), Err(RejectionReason::UnknownAccount));
    }

    #[test]
    fn test_validate_insufficient_balance() {
        let sheet = BalanceSheet::new(vec![200, 0, 0, 20]);
        let tx = Transfer::new(3, 1, 21);
        assert_eq!(tx.validate_with_state(&sheet), Err(RejectionReason::InsufficientBalance));
    }

    #[test]
    fn test_validate_exact_balance_is_allowed() {
        let sheet = BalanceSheet::new(vec![200, 0, 0, 20]);
        let tx = Transfer::new(3, 1, 20);
        assert_eq!(tx.validate_with_state(&sheet), Ok((0, 20)));
    }

    #[test]
    fn test_validate_huge_amount() {
        let sheet = BalanceSheet::new(vec![i64::MAX, 0]);
        let tx = Transfer::new(0, 1, u64::MAX);
        assert_eq!(tx.validate_with_state(&sheet), Err(RejectionReason::InsufficientBalance));
    }

    #[test]
    fn test_validate_recipient_overflow() {
        let sheet = BalanceSheet::new(vec![10, i64::MAX - 5]);
        assert_eq!(
            Transfer::new(0, 1, 10).validate_with_state(&sheet),
            Err(RejectionReason::BalanceOverflow)
        );
        assert_eq!(Transfer::new(0, 1, 5).validate_with_state(&sheet), Ok((5, i64::MAX)));
    }

    #[test]
    fn test_rejection_display() {
        let rejection = Rejection::new(Transfer::new(10, 3, 50), RejectionReason::UnknownAccount);
        assert_eq!(rejection.to_string(), "[10,3,50] rejected: unknown account");
    }
}
