//! Financial statements derived from the transaction list.
//!
//! Every statement is a pure function of the full list and is recomputed on
//! each request. Two bases are mixed on purpose:
//!
//! - the balance sheet and the operating expenses of the profit & loss use
//!   balances aggregated per account and typed by [`classify`](crate::classify);
//! - the trading account sums raw transaction amounts by their declared
//!   [`TransactionCategory`].
//!
//! Balance sheet totals and operating expenses use absolute balances, so an
//! account carrying an abnormal balance direction still adds to its total.

use crate::account::{Account, AccountType};
use crate::balance::{aggregate, Balances};
use crate::decimal::Amount;
use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::store::TransactionStore;
use crate::transaction::{Transaction, TransactionCategory};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSection {
    pub current_assets: Vec<Account>,
    pub fixed_assets: Vec<Account>,
    pub total_assets: Amount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiabilitySection {
    pub current_liabilities: Vec<Account>,
    pub long_term_liabilities: Vec<Account>,
    pub total_liabilities: Amount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquitySection {
    pub equity_accounts: Vec<Account>,
    pub total_equity: Amount,
}

/// Assets, liabilities and equity with their signed account balances.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BalanceSheet {
    pub assets: AssetSection,
    pub liabilities: LiabilitySection,
    pub equity: EquitySection,
}

/// Sales less cost of goods sold, by declared transaction category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingAccount {
    pub sales: Amount,
    pub cost_of_goods_sold: Amount,
    pub gross_profit: Amount,
}

/// Gross profit less operating expenses.
///
/// `operating_expenses` holds every account classified as an expense, with
/// its balance as an absolute value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLoss {
    pub gross_profit: Amount,
    pub operating_expenses: Vec<Account>,
    pub total_expenses: Amount,
    pub net_profit: Amount,
}

/// Headline figures drawn from the three statements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_assets: Amount,
    pub total_liabilities: Amount,
    pub total_equity: Amount,
    pub net_profit: Amount,
    pub gross_profit: Amount,
    pub total_transactions: usize,
}

/// Pairs each aggregated balance with its classified account type.
pub fn classify_balances(balances: Balances) -> Vec<Account> {
    balances
        .into_iter()
        .map(|(name, balance)| Account::new(name, balance))
        .collect()
}

fn sum_abs<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> Amount {
    accounts.into_iter().map(|a| a.balance.abs()).sum()
}

pub fn balance_sheet(transactions: &[Transaction]) -> BalanceSheet {
    let mut sheet = BalanceSheet::default();

    for account in classify_balances(aggregate(transactions)) {
        match account.account_type {
            AccountType::CurrentAsset => sheet.assets.current_assets.push(account),
            AccountType::FixedAsset => sheet.assets.fixed_assets.push(account),
            AccountType::CurrentLiability => sheet.liabilities.current_liabilities.push(account),
            AccountType::LongTermLiability => {
                sheet.liabilities.long_term_liabilities.push(account)
            }
            AccountType::Equity => sheet.equity.equity_accounts.push(account),
            AccountType::Revenue | AccountType::Expense | AccountType::CostOfGoodsSold => {}
        }
    }

    sheet.assets.total_assets =
        sum_abs(sheet.assets.current_assets.iter().chain(&sheet.assets.fixed_assets));
    sheet.liabilities.total_liabilities = sum_abs(
        sheet
            .liabilities
            .current_liabilities
            .iter()
            .chain(&sheet.liabilities.long_term_liabilities),
    );
    sheet.equity.total_equity = sum_abs(&sheet.equity.equity_accounts);

    sheet
}

fn sum_by_category(transactions: &[Transaction], category: TransactionCategory) -> Amount {
    transactions
        .iter()
        .filter(|tx| tx.category == category)
        .map(|tx| tx.amount)
        .sum()
}

pub fn trading_account(transactions: &[Transaction]) -> TradingAccount {
    let sales = sum_by_category(transactions, TransactionCategory::Revenue);
    let cost_of_goods_sold = sum_by_category(transactions, TransactionCategory::CostOfGoodsSold);

    TradingAccount {
        sales,
        cost_of_goods_sold,
        gross_profit: sales - cost_of_goods_sold,
    }
}

pub fn profit_loss(transactions: &[Transaction]) -> ProfitLoss {
    let gross_profit = trading_account(transactions).gross_profit;

    let operating_expenses: Vec<Account> = classify_balances(aggregate(transactions))
        .into_iter()
        .filter(|account| account.account_type == AccountType::Expense)
        .map(|account| Account {
            balance: account.balance.abs(),
            ..account
        })
        .collect();

    let total_expenses: Amount = operating_expenses.iter().map(|a| a.balance).sum();

    ProfitLoss {
        gross_profit,
        operating_expenses,
        total_expenses,
        net_profit: gross_profit - total_expenses,
    }
}

pub fn dashboard_metrics(transactions: &[Transaction]) -> DashboardMetrics {
    let sheet = balance_sheet(transactions);
    let pl = profit_loss(transactions);
    let trading = trading_account(transactions);

    DashboardMetrics {
        total_assets: sheet.assets.total_assets,
        total_liabilities: sheet.liabilities.total_liabilities,
        total_equity: sheet.equity.total_equity,
        net_profit: pl.net_profit,
        gross_profit: trading.gross_profit,
        total_transactions: transactions.len(),
    }
}

/// Report queries against a [`TransactionStore`].
///
/// Each call re-reads the store, so results always reflect its current
/// contents.
pub struct ReportComposer<'a, S> {
    store: &'a TransactionStore<S>,
}

impl<'a, S: KeyValueStore> ReportComposer<'a, S> {
    pub fn new(store: &'a TransactionStore<S>) -> Self {
        ReportComposer { store }
    }

    pub fn balance_sheet(&self) -> Result<BalanceSheet> {
        Ok(balance_sheet(&self.store.transactions()?))
    }

    pub fn trading_account(&self) -> Result<TradingAccount> {
        Ok(trading_account(&self.store.transactions()?))
    }

    pub fn profit_loss(&self) -> Result<ProfitLoss> {
        Ok(profit_loss(&self.store.transactions()?))
    }

    pub fn dashboard_metrics(&self) -> Result<DashboardMetrics> {
        Ok(dashboard_metrics(&self.store.transactions()?))
    }
}
