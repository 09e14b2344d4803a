//! Account types and name-based account classification.
//!
//! Account types are never declared by the caller. They are inferred from the
//! account name by walking [`CLASSIFICATION_RULES`] in order: the first rule
//! with a keyword contained in the lower-cased name wins, and names matching
//! no rule are expenses. Order is significant, e.g. "Short Term Loan" hits the
//! `short` keyword of the current-liability rule before the `loan` keyword of
//! the long-term rule is ever tried.

use crate::decimal::Amount;
use serde::Serialize;
use std::fmt;

/// Inferred type of a named account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    CurrentAsset,
    FixedAsset,
    CurrentLiability,
    LongTermLiability,
    Equity,
    Revenue,
    Expense,
    CostOfGoodsSold,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::CurrentAsset => "current_asset",
            AccountType::FixedAsset => "fixed_asset",
            AccountType::CurrentLiability => "current_liability",
            AccountType::LongTermLiability => "long_term_liability",
            AccountType::Equity => "equity",
            AccountType::Revenue => "revenue",
            AccountType::Expense => "expense",
            AccountType::CostOfGoodsSold => "cost_of_goods_sold",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    /// Lower-case substrings, any of which selects this rule
    pub keywords: &'static [&'static str],

    /// Type assigned when the rule matches
    pub account_type: AccountType,
}

impl ClassificationRule {
    /// Checks an already lower-cased account name against the keywords.
    pub fn matches(&self, lowered_name: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowered_name.contains(keyword))
    }
}

/// Classification rules in evaluation order.
pub const CLASSIFICATION_RULES: [ClassificationRule; 7] = [
    ClassificationRule {
        keywords: &["cash", "bank", "receivable", "inventory"],
        account_type: AccountType::CurrentAsset,
    },
    ClassificationRule {
        keywords: &["equipment", "building", "land", "furniture"],
        account_type: AccountType::FixedAsset,
    },
    ClassificationRule {
        keywords: &["payable", "accrued", "short"],
        account_type: AccountType::CurrentLiability,
    },
    ClassificationRule {
        keywords: &["loan", "mortgage", "bond"],
        account_type: AccountType::LongTermLiability,
    },
    ClassificationRule {
        keywords: &["capital", "equity", "retained"],
        account_type: AccountType::Equity,
    },
    ClassificationRule {
        keywords: &["sales", "revenue", "income"],
        account_type: AccountType::Revenue,
    },
    ClassificationRule {
        keywords: &["cost", "cogs"],
        account_type: AccountType::CostOfGoodsSold,
    },
];

/// Type given to names that match no rule.
pub const FALLBACK_ACCOUNT_TYPE: AccountType = AccountType::Expense;

/// Infers the account type from its name, case-insensitively.
///
/// Total: every name classifies to something. This is a keyword heuristic,
/// so unusual names can land in the wrong bucket.
pub fn classify(account_name: &str) -> AccountType {
    let lowered = account_name.to_lowercase();

    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.account_type)
        .unwrap_or(FALLBACK_ACCOUNT_TYPE)
}

/// A named account with its derived type and net balance.
///
/// Accounts are recomputed from the transaction list for every report and
/// are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub name: String,

    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Signed net balance: debits minus credits
    pub balance: Amount,
}

impl Account {
    /// Creates an account, classifying it by name.
    pub fn new(name: impl Into<String>, balance: Amount) -> Self {
        let name = name.into();
        let account_type = classify(&name);
        Account {
            name,
            account_type,
            balance,
        }
    }
}
