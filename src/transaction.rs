//! Transaction models for persistence, CSV parsing and reporting.

use crate::decimal::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Caller-declared classification of a transaction.
///
/// This is independent of the [`AccountType`](crate::account::AccountType)
/// inferred from account names. The trading account filters on this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategory {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
    CostOfGoodsSold,
}

impl TransactionCategory {
    /// Wire name used in storage and CSV.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionCategory::Asset => "asset",
            TransactionCategory::Liability => "liability",
            TransactionCategory::Equity => "equity",
            TransactionCategory::Revenue => "revenue",
            TransactionCategory::Expense => "expense",
            TransactionCategory::CostOfGoodsSold => "cost_of_goods_sold",
        }
    }
}

impl fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known transaction category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transaction category '{0}'")]
pub struct ParseCategoryError(pub String);

impl FromStr for TransactionCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");

        match normalized.as_str() {
            "asset" => Ok(TransactionCategory::Asset),
            "liability" => Ok(TransactionCategory::Liability),
            "equity" => Ok(TransactionCategory::Equity),
            "revenue" => Ok(TransactionCategory::Revenue),
            "expense" => Ok(TransactionCategory::Expense),
            "cost_of_goods_sold" | "cogs" => Ok(TransactionCategory::CostOfGoodsSold),
            _ => Err(ParseCategoryError(s.trim().to_string())),
        }
    }
}

/// A double-entry transaction: `amount` moves from `credit_account` to
/// `debit_account`.
///
/// Field names serialize in camelCase, which is the persisted list format.
/// Nothing checks that the two accounts differ or that their types are
/// compatible with `category`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier; saving with an existing id replaces that entry
    pub id: String,

    /// Calendar date as entered by the caller
    pub date: String,

    /// Free text
    pub description: String,

    /// Account whose balance increases
    pub debit_account: String,

    /// Account whose balance decreases
    pub credit_account: String,

    /// Non-negative amount moved
    pub amount: Amount,

    /// Caller-declared category
    pub category: TransactionCategory,

    /// Optional external reference such as an invoice number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Transaction {
    /// Creates a transaction without a reference.
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
        debit_account: impl Into<String>,
        credit_account: impl Into<String>,
        amount: Amount,
        category: TransactionCategory,
    ) -> Self {
        Transaction {
            id: id.into(),
            date: date.into(),
            description: description.into(),
            debit_account: debit_account.into(),
            credit_account: credit_account.into(),
            amount,
            category,
            reference: None,
        }
    }

    /// Attaches a reference.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// Raw transaction record as read from CSV.
///
/// All fields are read as strings so that a malformed value rejects only its
/// own row.
#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    pub id: String,

    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub description: String,

    pub debit_account: String,

    pub credit_account: String,

    pub amount: Option<String>,

    pub category: String,

    #[serde(default)]
    pub reference: Option<String>,
}

impl TransactionRecord {
    /// Parses the raw CSV record into a transaction.
    ///
    /// Returns `None` if the id or either account name is blank, or if the
    /// amount or category cannot be parsed.
    pub fn parse(&self) -> Option<Transaction> {
        let id = non_blank(&self.id)?;
        let debit_account = non_blank(&self.debit_account)?;
        let credit_account = non_blank(&self.credit_account)?;
        let amount = self.parse_amount()?;
        let category = TransactionCategory::from_str(&self.category).ok()?;

        Some(Transaction {
            id: id.to_string(),
            date: self.date.trim().to_string(),
            description: self.description.trim().to_string(),
            debit_account: debit_account.to_string(),
            credit_account: credit_account.to_string(),
            amount,
            category,
            reference: self
                .reference
                .as_deref()
                .and_then(non_blank)
                .map(str::to_string),
        })
    }

    /// Parses the amount field into a non-negative `Amount`.
    fn parse_amount(&self) -> Option<Amount> {
        let amount_str = self.amount.as_deref().and_then(non_blank)?;
        Amount::from_str(amount_str)
            .ok()
            .filter(|amount| !amount.is_negative())
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
