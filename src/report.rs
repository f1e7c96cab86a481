//! Table and summary formatting for query results.
//!
//! Pure formatting over any [`Write`], so the same code serves the
//! interactive shell and the tests.

use std::io::{self, Write};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::types::{Summary, Transaction, DECIMAL_SCALE};

/// Formats an amount with exactly [`DECIMAL_SCALE`] decimal places.
fn money(amount: Decimal) -> String {
    let mut amount = amount.round_dp(DECIMAL_SCALE);
    amount.rescale(DECIMAL_SCALE);
    amount.to_string()
}

/// Writes the filtered transactions as an aligned table followed by the
/// income/expense/net-savings summary.
///
/// An empty slice prints a notice instead of an empty table.
///
/// # Errors
/// Only if writing to `output` fails.
pub fn write_report<W: Write>(
    output: &mut W,
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
    date_format: &str,
) -> io::Result<()> {
    if transactions.is_empty() {
        writeln!(output, "No transactions found in the given date range")?;
        return Ok(());
    }

    writeln!(
        output,
        "Transactions from {} to {}",
        start.format(date_format),
        end.format(date_format)
    )?;

    let dates: Vec<String> = transactions
        .iter()
        .map(|transaction| transaction.date.format(date_format).to_string())
        .collect();
    let amounts: Vec<String> = transactions
        .iter()
        .map(|transaction| money(transaction.amount))
        .collect();
    let date_width = column_width("date", dates.iter());
    let amount_width = column_width("amount", amounts.iter());
    let category_width = column_width(
        "category",
        transactions
            .iter()
            .map(|transaction| transaction.category.to_string())
            .collect::<Vec<_>>()
            .iter(),
    );

    writeln!(
        output,
        "{:<date_width$}  {:>amount_width$}  {:<category_width$}  {}",
        "date", "amount", "category", "description"
    )?;
    for ((transaction, date), amount) in transactions.iter().zip(&dates).zip(&amounts) {
        writeln!(
            output,
            "{:<date_width$}  {:>amount_width$}  {:<category_width$}  {}",
            date,
            amount,
            transaction.category.to_string(),
            transaction.description
        )?;
    }

    let summary = Summary::of(transactions);
    writeln!(output)?;
    writeln!(output, "Summary:")?;
    writeln!(output, "Total Income: ${}", money(summary.total_income))?;
    writeln!(output, "Total Expense: ${}", money(summary.total_expense))?;
    writeln!(output, "Net Savings: ${}", money(summary.net_savings()))?;
    Ok(())
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a String>) -> usize {
    values
        .map(String::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}
