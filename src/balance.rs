//! Reduction of a transaction list into per-account net balances.

use crate::decimal::Amount;
use crate::transaction::Transaction;
use std::collections::BTreeMap;

/// Net balance per account name, ordered by name.
pub type Balances = BTreeMap<String, Amount>;

/// Accumulates signed balances: the debit account gains `amount`, the credit
/// account loses it.
///
/// Accounts appear only once referenced by some transaction. The result does
/// not depend on input order.
pub fn aggregate<'a, I>(transactions: I) -> Balances
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut balances = Balances::new();

    for tx in transactions {
        *balances.entry(tx.debit_account.clone()).or_default() += tx.amount;
        *balances.entry(tx.credit_account.clone()).or_default() -= tx.amount;
    }

    balances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionCategory;
    use std::str::FromStr;

    fn tx(id: &str, debit: &str, credit: &str, amount: &str) -> Transaction {
        Transaction::new(
            id,
            "2024-01-01",
            "",
            debit,
            credit,
            Amount::from_str(amount).unwrap(),
            TransactionCategory::Asset,
        )
    }

    #[test]
    fn test_debit_increases_credit_decreases() {
        let balances = aggregate(&[tx("1", "Cash", "Sales Revenue", "1000")]);

        assert_eq!(balances["Cash"].to_string(), "1000.0000");
        assert_eq!(balances["Sales Revenue"].to_string(), "-1000.0000");
        assert_eq!(balances.len(), 2);
    }

    #[test]
    fn test_accumulates_across_transactions() {
        let transactions = vec![
            tx("1", "Cash", "Owner Capital", "5000"),
            tx("2", "Rent Expense", "Cash", "1200.50"),
            tx("3", "Inventory", "Cash", "800.25"),
        ];
        let balances = aggregate(&transactions);

        assert_eq!(balances["Cash"].to_string(), "2999.2500");
        assert_eq!(balances["Owner Capital"].to_string(), "-5000.0000");
        assert_eq!(balances["Rent Expense"].to_string(), "1200.5000");
        assert_eq!(balances["Inventory"].to_string(), "800.2500");
    }

    #[test]
    fn test_order_independent() {
        let transactions = vec![
            tx("1", "Cash", "Owner Capital", "5000"),
            tx("2", "Rent Expense", "Cash", "0.1"),
            tx("3", "Inventory", "Accounts Payable", "0.2"),
            tx("4", "Cash", "Sales", "0.3"),
        ];
        let mut reversed = transactions.clone();
        reversed.reverse();
        let mut rotated = transactions.clone();
        rotated.rotate_left(2);

        let expected = aggregate(&transactions);
        assert_eq!(aggregate(&reversed), expected);
        assert_eq!(aggregate(&rotated), expected);
    }

    #[test]
    fn test_same_account_on_both_sides_nets_to_zero() {
        let balances = aggregate(&[tx("1", "Cash", "Cash", "42")]);
        assert!(balances["Cash"].is_zero());
    }

    #[test]
    fn test_overflowing_balances_saturate() {
        let huge = "50000000000000000000000000000";
        let balances = aggregate(&[
            tx("1", "Cash", "Sales", huge),
            tx("2", "Cash", "Sales", huge),
        ]);

        assert_eq!(balances["Cash"], Amount::MAX);
        assert_eq!(balances["Sales"], Amount::MIN);
    }

    #[test]
    fn test_empty_input() {
        let none: Vec<Transaction> = Vec::new();
        assert!(aggregate(&none).is_empty());
    }
}
