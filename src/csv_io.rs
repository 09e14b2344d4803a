//! CSV import of transactions and CSV/JSON rendering of statements.
//!
//! Imported rows use the header
//! `id,date,description,debit_account,credit_account,amount,category,reference`,
//! which is also what [`write_transactions`] produces.

use crate::account::Account;
use crate::error::Result;
use crate::report::{BalanceSheet, DashboardMetrics, ProfitLoss, TradingAccount};
use crate::storage::KeyValueStore;
use crate::store::TransactionStore;
use crate::transaction::{Transaction, TransactionRecord};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use serde::Serialize;
use std::io::{Read, Write};

const TRANSACTION_HEADER: [&str; 8] = [
    "id",
    "date",
    "description",
    "debit_account",
    "credit_account",
    "amount",
    "category",
    "reference",
];

/// Outcome of a CSV import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows that produced a transaction
    pub imported: usize,

    /// Of the imported rows, how many replaced an existing id
    pub replaced: usize,

    /// Rows skipped as malformed
    pub skipped: usize,
}

/// Reads transactions from CSV and upserts them into `store`.
///
/// Invalid rows are logged at warn level and skipped. Valid rows are saved
/// together with one write, in file order, so a later row with a repeated id
/// wins.
pub fn import_csv<R: Read, S: KeyValueStore>(
    reader: R,
    store: &mut TransactionStore<S>,
) -> Result<ImportSummary> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut summary = ImportSummary::default();
    let mut parsed = Vec::new();

    for (row_idx, result) in csv_reader.deserialize::<TransactionRecord>().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row

        match result {
            Ok(record) => match record.parse() {
                Some(tx) => {
                    debug!("Row {}: Parsed transaction {}", row_num, tx.id);
                    parsed.push(tx);
                }
                None => {
                    warn!("Row {}: Failed to parse transaction record", row_num);
                    summary.skipped += 1;
                }
            },
            Err(e) => {
                warn!("Row {}: CSV parse error: {}", row_num, e);
                summary.skipped += 1;
            }
        }
    }

    summary.imported = parsed.len();
    if !parsed.is_empty() {
        summary.replaced = store.save_all(parsed)?;
    }

    Ok(summary)
}

/// Writes transactions in the import format.
pub fn write_transactions<W: Write>(transactions: &[Transaction], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(TRANSACTION_HEADER)?;

    for tx in transactions {
        csv_writer.write_record([
            tx.id.as_str(),
            tx.date.as_str(),
            tx.description.as_str(),
            tx.debit_account.as_str(),
            tx.credit_account.as_str(),
            tx.amount.to_string().as_str(),
            tx.category.as_str(),
            tx.reference.as_deref().unwrap_or(""),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn write_accounts<W: Write>(
    csv_writer: &mut csv::Writer<W>,
    section: &str,
    accounts: &[Account],
) -> Result<()> {
    for account in accounts {
        csv_writer.write_record([
            section,
            account.name.as_str(),
            account.account_type.as_str(),
            account.balance.to_string().as_str(),
        ])?;
    }
    Ok(())
}

/// Writes the balance sheet as `section,account,type,balance` rows, each
/// group of accounts followed by its total.
pub fn write_balance_sheet<W: Write>(sheet: &BalanceSheet, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["section", "account", "type", "balance"])?;

    write_accounts(&mut csv_writer, "current_assets", &sheet.assets.current_assets)?;
    write_accounts(&mut csv_writer, "fixed_assets", &sheet.assets.fixed_assets)?;
    csv_writer.write_record([
        "total_assets",
        "",
        "",
        sheet.assets.total_assets.to_string().as_str(),
    ])?;

    write_accounts(
        &mut csv_writer,
        "current_liabilities",
        &sheet.liabilities.current_liabilities,
    )?;
    write_accounts(
        &mut csv_writer,
        "long_term_liabilities",
        &sheet.liabilities.long_term_liabilities,
    )?;
    csv_writer.write_record([
        "total_liabilities",
        "",
        "",
        sheet.liabilities.total_liabilities.to_string().as_str(),
    ])?;

    write_accounts(&mut csv_writer, "equity", &sheet.equity.equity_accounts)?;
    csv_writer.write_record([
        "total_equity",
        "",
        "",
        sheet.equity.total_equity.to_string().as_str(),
    ])?;

    csv_writer.flush()?;
    Ok(())
}

/// Writes the trading account as `line,amount` rows.
pub fn write_trading_account<W: Write>(trading: &TradingAccount, writer: W) -> Result<()> {
    write_pairs(
        ["line", "amount"],
        [
            ("sales", trading.sales.to_string()),
            ("cost_of_goods_sold", trading.cost_of_goods_sold.to_string()),
            ("gross_profit", trading.gross_profit.to_string()),
        ],
        writer,
    )
}

/// Writes the profit & loss as `line,account,amount` rows.
pub fn write_profit_loss<W: Write>(pl: &ProfitLoss, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["line", "account", "amount"])?;
    csv_writer.write_record(["gross_profit", "", pl.gross_profit.to_string().as_str()])?;
    for account in &pl.operating_expenses {
        csv_writer.write_record([
            "operating_expense",
            account.name.as_str(),
            account.balance.to_string().as_str(),
        ])?;
    }
    csv_writer.write_record(["total_expenses", "", pl.total_expenses.to_string().as_str()])?;
    csv_writer.write_record(["net_profit", "", pl.net_profit.to_string().as_str()])?;

    csv_writer.flush()?;
    Ok(())
}

/// Writes dashboard metrics as `metric,value` rows.
pub fn write_dashboard<W: Write>(metrics: &DashboardMetrics, writer: W) -> Result<()> {
    write_pairs(
        ["metric", "value"],
        [
            ("total_assets", metrics.total_assets.to_string()),
            ("total_liabilities", metrics.total_liabilities.to_string()),
            ("total_equity", metrics.total_equity.to_string()),
            ("net_profit", metrics.net_profit.to_string()),
            ("gross_profit", metrics.gross_profit.to_string()),
            ("total_transactions", metrics.total_transactions.to_string()),
        ],
        writer,
    )
}

fn write_pairs<W, I>(header: [&str; 2], rows: I, writer: W) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'static str, String)>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(header)?;
    for (label, value) in rows {
        csv_writer.write_record([label, value.as_str()])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes any report as pretty-printed JSON followed by a newline.
pub fn write_json<T: Serialize, W: Write>(value: &T, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Amount;
    use crate::report;
    use crate::storage::MemoryStore;
    use crate::transaction::TransactionCategory;
    use std::io::Cursor;

    fn import_str(csv: &str) -> (TransactionStore<MemoryStore>, ImportSummary) {
        let mut store = TransactionStore::new(MemoryStore::new());
        let summary = import_csv(Cursor::new(csv), &mut store).unwrap();
        (store, summary)
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut output = Vec::new();
        f(&mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_import_valid_rows() {
        let csv = r#"id,date,description,debit_account,credit_account,amount,category,reference
t1,2024-01-01,Test Sale,Cash,Sales Revenue,1000,revenue,INV-001
t2,2024-01-02,Rent,Rent Expense,Cash,500,expense,"#;

        let (store, summary) = import_str(csv);
        assert_eq!(
            summary,
            ImportSummary {
                imported: 2,
                replaced: 0,
                skipped: 0
            }
        );

        let all = store.transactions().unwrap();
        assert_eq!(all[0].reference.as_deref(), Some("INV-001"));
        assert_eq!(all[1].reference, None);
        assert_eq!(all[1].amount, Amount::from(500));
    }

    #[test]
    fn test_import_skips_bad_rows() {
        let csv = r#"id,date,description,debit_account,credit_account,amount,category,reference
t1,2024-01-01,ok,Cash,Sales,10,revenue,
t2,2024-01-01,no amount,Cash,Sales,,revenue,
t3,2024-01-01,bad category,Cash,Sales,10,gift,
,2024-01-01,no id,Cash,Sales,10,revenue,
t5,2024-01-01,short row
t6,2024-01-01,refund,Cash,Sales,-10,revenue,"#;

        let (store, summary) = import_str(csv);
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 5);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_import_handles_whitespace_and_repeated_ids() {
        let csv = r#"id, date, description, debit_account, credit_account, amount, category, reference
t1, 2024-01-01, first, Cash, Sales, 10.0, revenue,
t1, 2024-01-02, second, Cash, Sales, 20.0, revenue,"#;

        let (store, summary) = import_str(csv);
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.replaced, 1);

        let all = store.transactions().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].description, "second");
        assert_eq!(all[0].amount.to_string(), "20.0000");
    }

    #[test]
    fn test_import_empty_input_leaves_storage_untouched() {
        let (store, summary) = import_str("id,date,description,debit_account,credit_account,amount,category,reference\n");
        assert_eq!(summary, ImportSummary::default());
        assert_eq!(
            store.backend().get(crate::store::STORAGE_KEY).unwrap(),
            None
        );
    }

    #[test]
    fn test_export_then_import_preserves_transactions() {
        let original = vec![
            Transaction::new(
                "a",
                "2024-03-01",
                "Stock, bulk",
                "Inventory",
                "Accounts Payable",
                Amount::from(1200),
                TransactionCategory::Liability,
            )
            .with_reference("PO-7"),
            Transaction::new(
                "b",
                "2024-03-02",
                "Goods sold",
                "COGS",
                "Inventory",
                Amount::from(300),
                TransactionCategory::CostOfGoodsSold,
            ),
        ];

        let exported = render(|out| write_transactions(&original, out));
        let (store, _) = import_str(&exported);
        assert_eq!(store.transactions().unwrap(), original);
    }

    #[test]
    fn test_balance_sheet_output() {
        let books = vec![Transaction::new(
            "1",
            "2024-01-01",
            "",
            "Cash",
            "Owner Capital",
            Amount::from(100),
            TransactionCategory::Equity,
        )];
        let sheet = report::balance_sheet(&books);
        let output = render(|out| write_balance_sheet(&sheet, out));

        assert!(output.starts_with("section,account,type,balance\n"));
        assert!(output.contains("current_assets,Cash,current_asset,100.0000\n"));
        assert!(output.contains("total_assets,,,100.0000\n"));
        assert!(output.contains("total_liabilities,,,0.0000\n"));
        assert!(output.contains("equity,Owner Capital,equity,-100.0000\n"));
        assert!(output.contains("total_equity,,,100.0000\n"));
    }

    #[test]
    fn test_trading_and_profit_loss_output() {
        let books = vec![
            Transaction::new(
                "1",
                "",
                "",
                "Cash",
                "Sales",
                Amount::from(1000),
                TransactionCategory::Revenue,
            ),
            Transaction::new(
                "2",
                "",
                "",
                "Rent Expense",
                "Cash",
                Amount::from(400),
                TransactionCategory::Expense,
            ),
        ];

        let trading = render(|out| write_trading_account(&report::trading_account(&books), out));
        assert_eq!(
            trading,
            "line,amount\nsales,1000.0000\ncost_of_goods_sold,0.0000\ngross_profit,1000.0000\n"
        );

        let pl = render(|out| write_profit_loss(&report::profit_loss(&books), out));
        assert!(pl.contains("operating_expense,Rent Expense,400.0000\n"));
        assert!(pl.contains("net_profit,,600.0000\n"));
    }

    #[test]
    fn test_dashboard_output() {
        let output = render(|out| write_dashboard(&DashboardMetrics::default(), out));
        assert!(output.contains("total_assets,0.0000\n"));
        assert!(output.ends_with("total_transactions,0\n"));
    }

    #[test]
    fn test_json_output() {
        let output = render(|out| write_json(&TradingAccount::default(), out));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["grossProfit"], 0.0);
        assert!(output.ends_with('\n'));
    }
}
