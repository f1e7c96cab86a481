//! The interactive menu loop tying input, store, report, and chart together.
//!
//! Streams and the plot hook are injected so whole sessions can be scripted
//! in tests without a terminal.

use std::io::{self, BufRead, Write};

use crate::input;
use crate::report;
use crate::store::RecordStore;
use crate::types::Transaction;

/// What the user picked from the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    View,
    Exit,
}

/// Any input other than `1`, `2`, or `3` is an invalid choice, including
/// non-numeric text.
fn parse_choice(line: &str) -> Option<MenuChoice> {
    match line.trim() {
        "1" => Some(MenuChoice::Add),
        "2" => Some(MenuChoice::View),
        "3" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// Runs the menu loop until the user exits or the input stream closes.
///
/// `plot` is called with the filtered transactions when the user asks for a
/// chart after a query; the binary passes the terminal renderer, tests pass
/// a recording closure. Store and parse failures abort the current flow with
/// a printed message and drop back to the menu.
///
/// # Errors
/// Only input/output stream failures escape; everything else is handled in
/// the loop.
pub fn run<R, W, P>(
    store: &RecordStore,
    input: &mut R,
    output: &mut W,
    mut plot: P,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    P: FnMut(&[Transaction]) -> io::Result<()>,
{
    loop {
        writeln!(output)?;
        writeln!(output, "1. Add a new transaction")?;
        writeln!(output, "2. View transactions and summary within a date range")?;
        writeln!(output, "3. Exit")?;
        write!(output, "Enter a choice (1 or 2 or 3): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // stdin closed; same as choosing to exit
            return Ok(());
        }
        match parse_choice(&line) {
            Some(MenuChoice::Add) => add_flow(store, input, output)?,
            Some(MenuChoice::View) => view_flow(store, input, output, &mut plot)?,
            Some(MenuChoice::Exit) => {
                writeln!(output, "Exiting....")?;
                return Ok(());
            }
            None => writeln!(output, "Invalid choice. You can only enter 1, 2 or 3")?,
        }
    }
}

/// Collects all four fields and appends the transaction.
fn add_flow<R, W>(store: &RecordStore, input: &mut R, output: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    if let Err(err) = store.initialize() {
        writeln!(output, "Could not open the transaction store: {err}")?;
        return Ok(());
    }
    let date_format = store.config().date_format.clone();
    let date = input::read_date(
        input,
        output,
        "Please enter the date of the transaction (DD-MM-YYYY) or press Enter for today's date: ",
        true,
        &date_format,
    )?;
    let amount = input::read_amount(input, output)?;
    let category = input::read_category(input, output)?;
    let description = input::read_description(input, output)?;
    let transaction = Transaction::new(date, amount, category, description);
    match store.append(&transaction) {
        Ok(()) => writeln!(output, "Entry added successfully")?,
        Err(err) => writeln!(output, "Could not save the transaction: {err}")?,
    }
    Ok(())
}

/// Collects a date range, reports on the matching transactions, and offers
/// the chart.
fn view_flow<R, W, P>(
    store: &RecordStore,
    input: &mut R,
    output: &mut W,
    plot: &mut P,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    P: FnMut(&[Transaction]) -> io::Result<()>,
{
    let date_format = store.config().date_format.clone();
    let start = input::read_date(
        input,
        output,
        "Enter the start date (DD-MM-YYYY): ",
        false,
        &date_format,
    )?;
    let end = input::read_date(
        input,
        output,
        "Enter the end date (DD-MM-YYYY): ",
        false,
        &date_format,
    )?;
    let transactions = match store.query(start, end) {
        Ok(transactions) => transactions,
        Err(err) => {
            writeln!(output, "Could not read the transaction store: {err}")?;
            return Ok(());
        }
    };
    report::write_report(output, &transactions, start, end, &date_format)?;
    if input::read_yes_no(input, output, "Do you want to see a plot? (y/n): ")? {
        if let Err(err) = plot(&transactions) {
            writeln!(output, "Could not draw the chart: {err}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::{tempdir, TempDir};

    use crate::types::StoreConfig;

    use super::*;

    fn store_in(dir: &TempDir) -> RecordStore {
        RecordStore::new(StoreConfig {
            path: dir.path().join("finance_data.csv"),
            ..StoreConfig::default()
        })
    }

    fn run_session(store: &RecordStore, script: &str) -> String {
        let mut input = Cursor::new(script.to_string());
        let mut output = Vec::new();
        run(store, &mut input, &mut output, |_| Ok(())).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_add_then_view_session() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let script = "\
1
01-06-2024
1500.00
i
Salary
1
15-06-2024
200.50
e
Groceries
2
01-06-2024
30-06-2024
n
3
";
        let text = run_session(&store, script);
        assert_eq!(text.matches("Entry added successfully").count(), 2);
        assert!(text.contains("Transactions from 01-06-2024 to 30-06-2024"));
        assert!(text.contains("Total Income: $1500.00"));
        assert!(text.contains("Total Expense: $200.50"));
        assert!(text.contains("Net Savings: $1299.50"));
        assert!(text.contains("Exiting...."));
    }

    #[test]
    fn test_view_before_any_data() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let text = run_session(&store, "2\n01-06-2024\n30-06-2024\nn\n3\n");
        assert!(text.contains("No transactions found in the given date range"));
        assert!(text.contains("Exiting...."));
    }

    #[test]
    fn test_invalid_menu_choice_redisplays_menu() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        for bad in ["7", "abc", ""] {
            let text = run_session(&store, &format!("{bad}\n3\n"));
            assert!(text.contains("Invalid choice. You can only enter 1, 2 or 3"));
            assert!(text.contains("Exiting...."));
        }
    }

    #[test]
    fn test_plot_hook_called_only_on_yes() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let script = "1\n01-06-2024\n10.00\ni\n\n2\n01-06-2024\n01-06-2024\ny\n3\n";
        let mut input = Cursor::new(script);
        let mut output = Vec::new();
        let mut plotted = Vec::new();
        run(&store, &mut input, &mut output, |transactions| {
            plotted.push(transactions.len());
            Ok(())
        })
        .unwrap();
        assert_eq!(plotted, vec![1]);

        let text = run_session(&store, "2\n01-06-2024\n01-06-2024\nn\n3\n");
        assert!(text.contains("Total Income: $10.00"));
    }

    #[test]
    fn test_plot_failure_is_reported_not_fatal() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let script = "2\n01-06-2024\n01-06-2024\ny\n3\n";
        let mut input = Cursor::new(script);
        let mut output = Vec::new();
        run(&store, &mut input, &mut output, |_| {
            Err(io::Error::new(io::ErrorKind::Other, "no display"))
        })
        .unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Could not draw the chart"));
        assert!(text.contains("Exiting...."));
    }

    #[test]
    fn test_eof_at_menu_ends_session_cleanly() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        run(&store, &mut input, &mut output, |_| Ok(())).unwrap();
    }

    #[test]
    fn test_query_failure_drops_back_to_menu() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            &store.config().path,
            "date,amount,category,description\nnot-a-date,10.00,Income,Salary\n",
        )
        .unwrap();
        let text = run_session(&store, "2\n01-06-2024\n30-06-2024\n3\n");
        assert!(text.contains("Could not read the transaction store"));
        assert!(text.contains("Exiting...."));
    }
}
