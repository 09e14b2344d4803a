//! Bookkeeping CLI
//!
//! Records transactions into a JSON-backed ledger file and prints statements
//! derived from them.
//!
//! # Usage
//!
//! ```bash
//! bookkeeping add --id t1 --debit Cash --credit "Sales Revenue" --amount 1000 --category revenue
//! bookkeeping import transactions.csv
//! bookkeeping report balance-sheet > balance_sheet.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity
//! - `BOOKKEEPING_DATA`: Ledger file, overridden by `--data`

use bookkeeping::cli::{CliArgs, Command, ReportKind};
use bookkeeping::csv_io::{
    import_csv, write_balance_sheet, write_dashboard, write_json, write_profit_loss,
    write_trading_account, write_transactions,
};
use bookkeeping::{FileStore, ReportComposer, Result, TransactionStore};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    let args = CliArgs::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    let mut store = TransactionStore::new(FileStore::open(&args.data));

    let stdout = io::stdout();
    let handle = stdout.lock();

    match args.command {
        Command::Add(add) => {
            let tx = add.into_transaction();
            info!("Saving transaction {}", tx.id);
            store.save(tx)?;
        }
        Command::Delete { id } => {
            if !store.delete(&id)? {
                info!("No transaction with id {}", id);
            }
        }
        Command::List => {
            write_transactions(&store.transactions()?, handle)?;
        }
        Command::Import { input_file } => {
            let file = File::open(&input_file)?;
            let summary = import_csv(BufReader::new(file), &mut store)?;
            info!(
                "Imported {} transactions ({} replaced, {} rows skipped) from {}",
                summary.imported,
                summary.replaced,
                summary.skipped,
                input_file.display()
            );
        }
        Command::Report { kind, json } => {
            let reports = ReportComposer::new(&store);
            match (kind, json) {
                (ReportKind::BalanceSheet, false) => {
                    write_balance_sheet(&reports.balance_sheet()?, handle)?
                }
                (ReportKind::BalanceSheet, true) => write_json(&reports.balance_sheet()?, handle)?,
                (ReportKind::Trading, false) => {
                    write_trading_account(&reports.trading_account()?, handle)?
                }
                (ReportKind::Trading, true) => write_json(&reports.trading_account()?, handle)?,
                (ReportKind::ProfitLoss, false) => {
                    write_profit_loss(&reports.profit_loss()?, handle)?
                }
                (ReportKind::ProfitLoss, true) => write_json(&reports.profit_loss()?, handle)?,
                (ReportKind::Dashboard, false) => {
                    write_dashboard(&reports.dashboard_metrics()?, handle)?
                }
                (ReportKind::Dashboard, true) => {
                    write_json(&reports.dashboard_metrics()?, handle)?
                }
            }
        }
        Command::Clear => {
            store.clear()?;
            info!("Cleared {}", args.data.display());
        }
    }

    Ok(())
}
