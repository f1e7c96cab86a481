//! Terminal chart of income and expenses over time.
//!
//! The resampling half is pure and unit-tested; the rendering half takes
//! over the terminal (raw mode + alternate screen) until a key is pressed.

use std::collections::HashMap;
use std::io;

use chrono::{Duration, NaiveDate};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame, Terminal,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::types::{Category, Transaction};

/// Sums one category's amounts per calendar day.
///
/// The series spans every day from the earliest to the latest date in
/// `transactions` (regardless of category), with days that saw no activity
/// filled with zero, so the income and expense series share one daily axis.
/// Empty input gives an empty series.
#[must_use]
pub fn daily_series(transactions: &[Transaction], category: Category) -> Vec<(NaiveDate, Decimal)> {
    let first = match transactions.iter().map(|t| t.date).min() {
        Some(first) => first,
        None => return Vec::new(),
    };
    let last = transactions
        .iter()
        .map(|t| t.date)
        .max()
        .unwrap_or(first);

    let mut by_day: HashMap<NaiveDate, Decimal> = HashMap::new();
    for transaction in transactions.iter().filter(|t| t.category == category) {
        *by_day.entry(transaction.date).or_default() += transaction.amount;
    }

    let mut series = Vec::new();
    let mut day = first;
    while day <= last {
        series.push((day, by_day.get(&day).copied().unwrap_or(Decimal::ZERO)));
        day += Duration::days(1);
    }
    series
}

fn points(series: &[(NaiveDate, Decimal)]) -> Vec<(f64, f64)> {
    series
        .iter()
        .enumerate()
        .map(|(day, (_, amount))| (day as f64, amount.to_f64().unwrap_or(0.0)))
        .collect()
}

fn axis_labels(series: &[(NaiveDate, Decimal)], date_format: &str) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    if let Some((first, _)) = series.first() {
        labels.push(first.format(date_format).to_string());
    }
    if series.len() > 2 {
        let (middle, _) = series[series.len() / 2];
        labels.push(middle.format(date_format).to_string());
    }
    if series.len() > 1 {
        let (last, _) = series[series.len() - 1];
        labels.push(last.format(date_format).to_string());
    }
    labels
}

/// Draws the income/expense chart full screen and waits for a key press.
///
/// Does nothing when `transactions` is empty.
///
/// # Errors
/// Propagates terminal setup and drawing failures; callers should treat
/// these as environment problems, not data problems.
pub fn show(transactions: &[Transaction], date_format: &str) -> io::Result<()> {
    if transactions.is_empty() {
        return Ok(());
    }

    let income_series = daily_series(transactions, Category::Income);
    let expense_series = daily_series(transactions, Category::Expense);
    let income = points(&income_series);
    let expense = points(&expense_series);
    let x_labels = axis_labels(&income_series, date_format);
    let last_index = (income_series.len() - 1) as f64;
    let max_amount = income
        .iter()
        .chain(&expense)
        .map(|(_, amount)| *amount)
        .fold(0.0_f64, f64::max);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = draw_until_key(
        &mut terminal,
        &income,
        &expense,
        &x_labels,
        last_index,
        max_amount,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn draw_until_key<B: Backend>(
    terminal: &mut Terminal<B>,
    income: &[(f64, f64)],
    expense: &[(f64, f64)],
    x_labels: &[String],
    last_index: f64,
    max_amount: f64,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| {
            render_chart(frame, income, expense, x_labels, last_index, max_amount);
        })?;
        if let Event::Key(_) = event::read()? {
            return Ok(());
        }
    }
}

fn render_chart(
    frame: &mut Frame,
    income: &[(f64, f64)],
    expense: &[(f64, f64)],
    x_labels: &[String],
    last_index: f64,
    max_amount: f64,
) {
    let datasets = vec![
        Dataset::default()
            .name("Income")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(income),
        Dataset::default()
            .name("Expense")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(expense),
    ];

    // Leave headroom above the tallest point so the line doesn't hug the frame.
    let upper = if max_amount > 0.0 { max_amount * 1.1 } else { 1.0 };
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Income and Expenses Over Time"),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .bounds([0.0, last_index.max(1.0)])
                .labels(x_labels.iter().map(|label| Span::raw(label.clone())).collect()),
        )
        .y_axis(
            Axis::default()
                .title("Amount")
                .bounds([0.0, upper])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.2}", upper / 2.0)),
                    Span::raw(format!("{upper:.2}")),
                ]),
        );
    frame.render_widget(chart, frame.size());
}
