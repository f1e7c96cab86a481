//! Append-only transaction store backed by a single CSV file.
//!
//! The file layout is fixed: a `date,amount,category,description` header
//! followed by one row per transaction, dates formatted with the store's
//! configured pattern. Every query re-reads the whole file; there is no
//! index, no cache, and no re-sorting, so results come back in file order.

use std::fs::{File, OpenOptions};

use chrono::NaiveDate;
use csv::Trim;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::types::{Category, StoreConfig, Transaction};

const HEADER: [&str; 4] = ["date", "amount", "category", "description"];

/// On-disk representation of a [`Transaction`].
///
/// The date travels as text so the store's configured format applies;
/// everything else maps directly through serde.
#[derive(Debug, Serialize, Deserialize)]
struct RawRecord {
    date: String,
    amount: Decimal,
    category: Category,
    description: String,
}

impl RawRecord {
    fn from_transaction(transaction: &Transaction, date_format: &str) -> Self {
        Self {
            date: transaction.date.format(date_format).to_string(),
            amount: transaction.amount,
            category: transaction.category,
            description: transaction.description.clone(),
        }
    }

    fn into_transaction(self, date_format: &str) -> Result<Transaction> {
        let date = match NaiveDate::parse_from_str(&self.date, date_format) {
            Ok(date) => date,
            Err(_) => {
                return Err(Error::Date {
                    value: self.date,
                    format: date_format.to_string(),
                })
            }
        };
        Ok(Transaction::new(
            date,
            self.amount,
            self.category,
            self.description,
        ))
    }
}

/// Append-only store of transactions over the file named by a
/// [`StoreConfig`]
#[derive(Debug)]
pub struct RecordStore {
    config: StoreConfig,
}

impl RecordStore {
    /// Creates a store over the file named by `config`. No I/O happens until
    /// the first operation.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// The configuration this store was created with
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Ensures the backing file exists with the header row.
    ///
    /// A no-op when the file is already present, so existing rows are never
    /// touched and the header is never duplicated.
    ///
    /// # Errors
    /// [`Error::Storage`] if the file cannot be created.
    pub fn initialize(&self) -> Result<()> {
        if self.config.path.exists() {
            return Ok(());
        }
        let file = File::create(&self.config.path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(HEADER)?;
        writer.flush()?;
        Ok(())
    }

    /// Appends one transaction as a single row.
    ///
    /// The store is initialized first, so appending to a fresh path works.
    /// Durability is whatever the OS gives a buffered append; there is no
    /// fsync.
    ///
    /// # Errors
    /// [`Error::Storage`] if the file cannot be opened or written.
    pub fn append(&self, transaction: &Transaction) -> Result<()> {
        self.initialize()?;
        let file = OpenOptions::new().append(true).open(&self.config.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(RawRecord::from_transaction(
            transaction,
            &self.config.date_format,
        ))?;
        writer.flush()?;
        Ok(())
    }

    /// Returns every transaction with `start <= date <= end`, inclusive on
    /// both ends, in file order.
    ///
    /// Querying a store that has never been written to returns an empty
    /// vector.
    ///
    /// # Errors
    /// [`Error::Storage`] if the file cannot be opened, [`Error::Parse`] or
    /// [`Error::Date`] if any row's amount or date is malformed.
    pub fn query(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transaction>> {
        self.initialize()?;
        let file = File::open(&self.config.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(file);
        let mut matches = Vec::new();
        for record in reader.deserialize() {
            let raw: RawRecord = record?;
            let transaction = raw.into_transaction(&self.config.date_format)?;
            if (start..=end).contains(&transaction.date) {
                matches.push(transaction);
            }
        }
        Ok(matches)
    }
}
