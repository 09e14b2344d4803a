//! # Bookkeeping
//!
//! A double-entry transaction ledger persisted through a pluggable key-value
//! store, with financial statements derived on demand.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: Uses 4 decimal places via `rust_decimal`
//! - **Derived accounts**: Account types are inferred from account names,
//!   balances are recomputed from the full transaction list on every report
//! - **Injected persistence**: The transaction list lives under one key of a
//!   [`KeyValueStore`]; corrupt stored data reads as an empty ledger
//! - **Deterministic output**: Accounts are listed by name
//!
//! ## Example
//!
//! ```
//! use bookkeeping::{
//!     Amount, MemoryStore, ReportComposer, Transaction, TransactionCategory, TransactionStore,
//! };
//!
//! let mut store = TransactionStore::new(MemoryStore::new());
//! store
//!     .save(Transaction::new(
//!         "test-1",
//!         "2024-01-01",
//!         "Test Sale",
//!         "Cash",
//!         "Sales Revenue",
//!         Amount::from(1000),
//!         TransactionCategory::Revenue,
//!     ))
//!     .unwrap();
//!
//! let reports = ReportComposer::new(&store);
//! assert_eq!(reports.trading_account().unwrap().gross_profit, Amount::from(1000));
//! assert_eq!(reports.profit_loss().unwrap().net_profit, Amount::from(1000));
//! ```

pub mod account;
pub mod balance;
pub mod cli;
pub mod csv_io;
pub mod decimal;
pub mod error;
pub mod report;
pub mod storage;
pub mod store;
pub mod transaction;

pub use account::{classify, Account, AccountType, ClassificationRule, CLASSIFICATION_RULES};
pub use balance::{aggregate, Balances};
pub use csv_io::ImportSummary;
pub use decimal::Amount;
pub use error::{BookkeepingError, Result};
pub use report::{
    BalanceSheet, DashboardMetrics, ProfitLoss, ReportComposer, TradingAccount,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{TransactionStore, STORAGE_KEY};
pub use transaction::{Transaction, TransactionCategory, TransactionRecord};
