//! Common datatypes supporting functions throughout Fintrack

use std::fmt::Display;
use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The number of decimals to track for all amounts
pub const DECIMAL_SCALE: u32 = 2;

/// Date format used on disk and in prompts (`DD-MM-YYYY`)
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Default name of the backing CSV file
pub const DEFAULT_FILE: &str = "finance_data.csv";

/// Whether a transaction adds to or subtracts from savings
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

impl Category {
    /// Parses interactive input into a category.
    ///
    /// Accepts `I`/`E` or the full words, in any case; anything else is
    /// `None`.
    #[must_use]
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "i" | "income" => Some(Self::Income),
            "e" | "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A single ledger entry.
///
/// Transactions are immutable once written to the store; there is no update
/// or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Calendar date on which the transaction occurred
    pub date: NaiveDate,
    /// Amount of money moved; always positive, the direction comes from
    /// `category`
    pub amount: Decimal,
    /// Whether this is income or an expense
    pub category: Category,
    /// Free-form note; may be empty
    pub description: String,
}

impl Transaction {
    /// Creates a transaction, rescaling the amount to [`DECIMAL_SCALE`]
    #[must_use]
    pub fn new(
        date: NaiveDate,
        mut amount: Decimal,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        amount.rescale(DECIMAL_SCALE);
        Self {
            date,
            amount,
            category,
            description: description.into(),
        }
    }
}

/// Income, expense, and savings totals for a set of transactions
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Sum of all [`Category::Income`] amounts
    pub total_income: Decimal,
    /// Sum of all [`Category::Expense`] amounts
    pub total_expense: Decimal,
}

impl Summary {
    /// Totals up a slice of transactions
    #[must_use]
    pub fn of(transactions: &[Transaction]) -> Self {
        let mut summary = Self::default();
        for transaction in transactions {
            match transaction.category {
                Category::Income => summary.total_income += transaction.amount,
                Category::Expense => summary.total_expense += transaction.amount,
            }
        }
        summary
    }

    /// Income minus expenses
    #[must_use]
    pub fn net_savings(&self) -> Decimal {
        self.total_income - self.total_expense
    }
}

/// Configuration for a [`RecordStore`](crate::store::RecordStore).
///
/// Passed in at construction so every store instance can have its own file
/// and date format, rather than sharing process-wide constants.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the backing CSV file
    pub path: PathBuf,
    /// `chrono` format string used for dates on disk
    pub date_format: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_FILE),
            date_format: DATE_FORMAT.to_string(),
        }
    }
}
