use chrono::NaiveDate;
use fixed::types::I51F13;

use crate::{ColumnLabel, ColumnMapping, StatementTable};

/// The date formats tried, in order, when none are configured
pub const DEFAULT_DATE_FORMATS: [&str; 3] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y"];

const CURRENCY_SYMBOLS: &[char] = &['$', '£', '€'];

/// Possible errors that stop an extraction as a whole
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("No column is labelled `{0}`")]
    MissingLabel(ColumnLabel),
}

/// Possible reasons for a single row to be rejected
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("The row has no cell in column {column} ({label})")]
    MissingCell { label: ColumnLabel, column: usize },
    #[error("`{0}` is not a date in any of the accepted formats")]
    InvalidDate(String),
    #[error("`{0}` is not an amount")]
    InvalidAmount(String),
}

/// A statement row that could not be turned into a transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedRow {
    /// The 0-based index of the row in the parsed table
    pub row: usize,
    pub reason: RowError,
}

/// Controls how labelled rows are read
#[derive(Clone, Debug)]
pub struct ExtractOptions {
    /// Drop the first row of the table
    pub skip_header: bool,
    /// `chrono` format strings, tried in order
    pub date_formats: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            skip_header: false,
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|&format| format.to_owned()).collect(),
        }
    }
}

/// A single booked line of a bank statement
///
/// Negative amounts are debits, positive amounts are credits.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StatementTransaction {
    date: NaiveDate,
    amount: I51F13,
    description: String,
}

impl StatementTransaction {
    pub fn new(date: NaiveDate, amount: I51F13, description: impl Into<String>) -> Self {
        Self {
            date,
            amount,
            description: description.into(),
        }
    }

    /// The booking date
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The signed amount
    pub fn amount(&self) -> I51F13 {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// The outcome of an extraction
#[derive(Debug, Default)]
pub struct ExtractReport {
    pub transactions: Vec<StatementTransaction>,
    pub rejected: Vec<RejectedRow>,
}

/// Turns every labelled row of `table` into a transaction
///
/// Rows that cannot be read are collected in [`ExtractReport::rejected`]
/// instead of failing the whole extraction.
pub fn extract_transactions(
    table: &StatementTable,
    mapping: &ColumnMapping,
    options: &ExtractOptions,
) -> Result<ExtractReport, ExtractError> {
    let column = |label| mapping
        .column_of(label)
        .ok_or(ExtractError::MissingLabel(label));
    let date_column = column(ColumnLabel::Date)?;
    let description_column = column(ColumnLabel::Description)?;
    let amount_column = column(ColumnLabel::Amount)?;

    let mut report = ExtractReport::default();
    let skip = usize::from(options.skip_header);

    for (index, row) in table.rows().iter().enumerate().skip(skip) {
        let cell = move |label, column: usize| row
            .get(column)
            .map(String::as_str)
            .ok_or(RowError::MissingCell { label, column });

        let transaction = cell(ColumnLabel::Date, date_column)
            .and_then(|date| parse_date(date, &options.date_formats))
            .and_then(|date| {
                let amount = parse_amount(cell(ColumnLabel::Amount, amount_column)?)?;
                let description = cell(ColumnLabel::Description, description_column)?.trim();
                Ok(StatementTransaction::new(date, amount, description))
            });

        match transaction {
            Ok(transaction) => report.transactions.push(transaction),
            Err(reason) => {
                tracing::debug!(row = index, %reason, "rejected statement row");
                report.rejected.push(RejectedRow { row: index, reason });
            }
        }
    }

    Ok(report)
}

fn parse_date(cell: &str, formats: &[String]) -> Result<NaiveDate, RowError> {
    let trimmed = cell.trim();
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| RowError::InvalidDate(cell.to_owned()))
}

/// Parses amounts like `-39.93`, `$1,250.00` or `-€15.40`
fn parse_amount(cell: &str) -> Result<I51F13, RowError> {
    let invalid = || RowError::InvalidAmount(cell.to_owned());

    let trimmed = cell.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest
        .trim_start_matches(CURRENCY_SYMBOLS)
        .trim_start()
        .chars()
        .filter(|&c| c != ',')
        .collect();
    // the sign was consumed above, a second one is malformed
    if digits.starts_with(['+', '-']) {
        return Err(invalid());
    }

    let amount = digits
        .parse::<I51F13>()
        .map_err(|_| invalid())?;

    match negative {
        false => Ok(amount),
        true => amount.checked_neg().ok_or_else(invalid),
    }
}
