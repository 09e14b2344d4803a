//! Command-line arguments.

use crate::decimal::Amount;
use crate::transaction::{Transaction, TransactionCategory};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Record double-entry transactions and print financial statements
#[derive(Parser, Debug)]
#[command(name = "bookkeeping", version)]
#[command(about = "Record double-entry transactions and print financial statements", long_about = None)]
pub struct CliArgs {
    /// File holding the persisted ledger
    #[arg(
        long = "data",
        value_name = "PATH",
        env = "BOOKKEEPING_DATA",
        default_value = "bookkeeping.json",
        global = true
    )]
    pub data: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Save a transaction, replacing any existing one with the same id
    Add(AddArgs),

    /// Delete a transaction by id
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Print all transactions as CSV
    List,

    /// Import transactions from a CSV file
    Import {
        #[arg(value_name = "INPUT")]
        input_file: PathBuf,
    },

    /// Print a financial statement
    Report {
        #[arg(value_name = "KIND")]
        kind: ReportKind,

        /// Print JSON instead of CSV
        #[arg(long)]
        json: bool,
    },

    /// Remove every stored transaction
    Clear,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub id: String,

    #[arg(long, default_value = "")]
    pub date: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Account receiving the debit
    #[arg(long = "debit", value_name = "ACCOUNT")]
    pub debit_account: String,

    /// Account receiving the credit
    #[arg(long = "credit", value_name = "ACCOUNT")]
    pub credit_account: String,

    #[arg(long)]
    pub amount: Amount,

    /// asset, liability, equity, revenue, expense or cost_of_goods_sold
    #[arg(long)]
    pub category: TransactionCategory,

    #[arg(long)]
    pub reference: Option<String>,
}

impl AddArgs {
    pub fn into_transaction(self) -> Transaction {
        Transaction {
            id: self.id,
            date: self.date,
            description: self.description,
            debit_account: self.debit_account,
            credit_account: self.credit_account,
            amount: self.amount,
            category: self.category,
            reference: self.reference,
        }
    }
}

/// Statements available from `report`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    BalanceSheet,
    Trading,
    ProfitLoss,
    Dashboard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let args = CliArgs::try_parse_from([
            "bookkeeping",
            "add",
            "--id",
            "t1",
            "--debit",
            "Cash",
            "--credit",
            "Sales Revenue",
            "--amount",
            "1000",
            "--category",
            "revenue",
            "--reference",
            "INV-001",
        ])
        .unwrap();

        let Command::Add(add) = args.command else {
            panic!("Expected Add");
        };
        let tx = add.into_transaction();
        assert_eq!(tx.credit_account, "Sales Revenue");
        assert_eq!(tx.amount, Amount::from(1000));
        assert_eq!(tx.category, TransactionCategory::Revenue);
        assert_eq!(tx.reference.as_deref(), Some("INV-001"));
        assert_eq!(tx.date, "");
    }

    #[test]
    fn test_add_rejects_bad_values() {
        let base = ["bookkeeping", "add", "--id", "t1", "--debit", "a", "--credit", "b"];

        let bad_amount = [&base[..], &["--amount", "lots", "--category", "revenue"][..]].concat();
        assert!(CliArgs::try_parse_from(bad_amount).is_err());

        let bad_category = [&base[..], &["--amount", "1", "--category", "gift"][..]].concat();
        assert!(CliArgs::try_parse_from(bad_category).is_err());
    }

    #[test]
    fn test_parse_report_kinds() {
        let cases = [
            ("balance-sheet", ReportKind::BalanceSheet),
            ("trading", ReportKind::Trading),
            ("profit-loss", ReportKind::ProfitLoss),
            ("dashboard", ReportKind::Dashboard),
        ];

        for (arg, expected) in cases {
            let args = CliArgs::try_parse_from(["bookkeeping", "report", arg]).unwrap();
            match args.command {
                Command::Report { kind, json } => {
                    assert_eq!(kind, expected);
                    assert!(!json);
                }
                other => panic!("Expected Report, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_data_flag_after_subcommand() {
        let args =
            CliArgs::try_parse_from(["bookkeeping", "list", "--data", "/tmp/books.json"]).unwrap();
        assert_eq!(args.data, PathBuf::from("/tmp/books.json"));
    }
}
