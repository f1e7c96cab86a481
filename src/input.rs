//! Prompted, validated readers for transaction fields.
//!
//! Every reader loops until it gets a valid value, printing a short message
//! on bad input. Streams are injected rather than bound to stdin/stdout so
//! tests can script a whole session with in-memory buffers.

use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use crate::types::Category;

/// Reads one line, trimmed of the trailing newline.
///
/// End of input is reported as [`io::ErrorKind::UnexpectedEof`] so callers
/// can tell a closed session from an empty line.
fn prompt_line<R, W>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input stream closed",
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Prompts for a date in the given `chrono` format.
///
/// An empty line is substituted with today's date when `allow_default` is
/// set; otherwise invalid input re-prompts indefinitely.
///
/// # Errors
/// Only if the underlying streams fail; validation never escapes the loop.
pub fn read_date<R, W>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    allow_default: bool,
    date_format: &str,
) -> io::Result<NaiveDate>
where
    R: BufRead,
    W: Write,
{
    loop {
        let line = prompt_line(input, output, prompt)?;
        if line.is_empty() && allow_default {
            return Ok(Local::now().date_naive());
        }
        match NaiveDate::parse_from_str(line.trim(), date_format) {
            Ok(date) => return Ok(date),
            Err(_) => writeln!(
                output,
                "Invalid date format. Please use the {date_format} format."
            )?,
        }
    }
}

/// Prompts for a positive decimal amount, re-prompting on anything else.
///
/// # Errors
/// Only if the underlying streams fail.
pub fn read_amount<R, W>(input: &mut R, output: &mut W) -> io::Result<Decimal>
where
    R: BufRead,
    W: Write,
{
    loop {
        let line = prompt_line(input, output, "Enter the amount: ")?;
        match line.trim().parse::<Decimal>() {
            Ok(amount) if amount > Decimal::ZERO => return Ok(amount),
            _ => writeln!(output, "Invalid amount. Please enter a positive number.")?,
        }
    }
}

/// Prompts for a category, normalizing `I`/`E` input to
/// [`Category::Income`]/[`Category::Expense`].
///
/// # Errors
/// Only if the underlying streams fail.
pub fn read_category<R, W>(input: &mut R, output: &mut W) -> io::Result<Category>
where
    R: BufRead,
    W: Write,
{
    loop {
        let line = prompt_line(
            input,
            output,
            "Enter the category ('I' for Income or 'E' for Expense): ",
        )?;
        match Category::from_input(&line) {
            Some(category) => return Ok(category),
            None => writeln!(
                output,
                "Invalid category. Please enter 'I' for Income or 'E' for Expense."
            )?,
        }
    }
}

/// Prompts for a description; any input is accepted, including empty.
///
/// # Errors
/// Only if the underlying streams fail.
pub fn read_description<R, W>(input: &mut R, output: &mut W) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    prompt_line(input, output, "Enter a description (optional): ")
}

/// Asks a yes/no question; only `y` (any case) counts as yes.
///
/// # Errors
/// Only if the underlying streams fail.
pub fn read_yes_no<R, W>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    let line = prompt_line(input, output, prompt)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rust_decimal_macros::dec;
    use test_case::test_case;

    use crate::types::DATE_FORMAT;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_read_date_accepts_valid_input() {
        let mut input = Cursor::new("15-06-2024\n");
        let mut output = Vec::new();
        let result = read_date(&mut input, &mut output, "date: ", false, DATE_FORMAT).unwrap();
        assert_eq!(result, date("15-06-2024"));
    }

    #[test]
    fn test_read_date_reprompts_until_valid() {
        let mut input = Cursor::new("june first\n2024-06-15\n15-06-2024\n");
        let mut output = Vec::new();
        let result = read_date(&mut input, &mut output, "date: ", false, DATE_FORMAT).unwrap();
        assert_eq!(result, date("15-06-2024"));
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Invalid date format").count(), 2);
    }

    #[test]
    fn test_read_date_empty_line_defaults_to_today() {
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();
        let result = read_date(&mut input, &mut output, "date: ", true, DATE_FORMAT).unwrap();
        assert_eq!(result, Local::now().date_naive());
    }

    #[test]
    fn test_read_date_empty_line_without_default_reprompts() {
        let mut input = Cursor::new("\n01-06-2024\n");
        let mut output = Vec::new();
        let result = read_date(&mut input, &mut output, "date: ", false, DATE_FORMAT).unwrap();
        assert_eq!(result, date("01-06-2024"));
    }

    #[test]
    fn test_read_date_eof_is_an_error() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let err = read_date(&mut input, &mut output, "date: ", false, DATE_FORMAT).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test_case("100\n" => dec!(100) ; "integer")]
    #[test_case("200.50\n" => dec!(200.50) ; "two decimals")]
    #[test_case("abc\n12.5\n" => dec!(12.5) ; "retry after non numeric")]
    #[test_case("-5\n0\n3.00\n" => dec!(3.00) ; "retry after non positive")]
    fn test_read_amount(script: &str) -> Decimal {
        let mut input = Cursor::new(script);
        let mut output = Vec::new();
        read_amount(&mut input, &mut output).unwrap()
    }

    #[test]
    fn test_read_category_normalizes_letters() {
        let mut input = Cursor::new("i\n");
        let mut output = Vec::new();
        assert_eq!(
            read_category(&mut input, &mut output).unwrap(),
            Category::Income
        );
        let mut input = Cursor::new("E\n");
        assert_eq!(
            read_category(&mut input, &mut output).unwrap(),
            Category::Expense
        );
    }

    #[test]
    fn test_read_category_reprompts_on_junk() {
        let mut input = Cursor::new("z\nincome\n");
        let mut output = Vec::new();
        assert_eq!(
            read_category(&mut input, &mut output).unwrap(),
            Category::Income
        );
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Invalid category"));
    }

    #[test]
    fn test_read_description_accepts_empty() {
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();
        assert_eq!(read_description(&mut input, &mut output).unwrap(), "");
    }

    #[test]
    fn test_read_description_keeps_text_verbatim() {
        let mut input = Cursor::new("Weekly groceries at the market\n");
        let mut output = Vec::new();
        assert_eq!(
            read_description(&mut input, &mut output).unwrap(),
            "Weekly groceries at the market"
        );
    }

    #[test]
    fn test_read_yes_no_only_y_is_yes() {
        for (answer, expected) in [("y\n", true), ("Y\n", true), ("n\n", false), ("yes\n", false)] {
            let mut input = Cursor::new(answer);
            let mut output = Vec::new();
            assert_eq!(
                read_yes_no(&mut input, &mut output, "plot? ").unwrap(),
                expected
            );
        }
    }
}
